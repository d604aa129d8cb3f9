mod pointer_events;
pub use pointer_events::*;

mod drawing_surface;
pub use drawing_surface::*;
