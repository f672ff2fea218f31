pub use self::{catalog::*, geometry::*, layout::*, level::*, room::*, score::*};

pub(crate) mod catalog;
pub(crate) mod geometry;
pub(crate) mod layout;
pub(crate) mod level;
pub(crate) mod room;
pub(crate) mod score;
