mod stroke;
pub use stroke::*;

mod state;
pub use state::*;

mod render_model;
pub use render_model::*;

mod capture;
pub use capture::*;
