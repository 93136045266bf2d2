//! Page views.

pub(crate) mod logs;
pub(crate) mod status;
