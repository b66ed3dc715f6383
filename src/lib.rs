pub mod v1;

pub mod prelude {
    pub use crate::v1::aws::{lambda::*, *};
    pub use crate::v1::config::*;
    pub use crate::v1::event::*;
    pub use crate::v1::handler::*;
}
