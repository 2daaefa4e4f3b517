//! Configuration types shared by the resolver and the controller.
//!
//! ## Modules
//!
//! - [`field`]: the closed set of policy fields and their key names
//! - [`defaults`]: built-in values, the lowest-precedence source
//! - [`environment`]: operator-supplied values from the deployment

pub mod defaults;
pub mod environment;
pub mod field;

pub use environment::EnvironmentConfig;
pub use field::PolicyField;

/// RON options used for every configuration file.
///
/// `IMPLICIT_SOME` lets optional fields be written without `Some(..)`, and
/// `UNWRAP_VARIANT_NEWTYPES` lets `File(path: "..")` stand for
/// `File((path: ".."))`.
#[must_use]
pub fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(
        ron::extensions::Extensions::IMPLICIT_SOME
            | ron::extensions::Extensions::UNWRAP_VARIANT_NEWTYPES,
    )
}

/// A value counts as present only when it is non-empty.
///
/// Every precedence layer uses this test, so an empty string in any source
/// falls through to the next one.
#[must_use]
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
