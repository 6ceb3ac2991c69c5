//! Assertion helpers shared by the workspace's tests.

pub mod result;

pub mod prelude {
    pub use crate::{assert_err, assert_err_is, assert_ok};
}
