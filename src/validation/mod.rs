//! Rule-based checks over the converted text.
//!
//! Both validators are pure functions of their input. Rule violations are returned as typed
//! issues in rule order, never as errors; an empty list means the stage passed. Issues
//! serialise as their display message.

pub(crate) mod readiness;
pub(crate) mod structural;


pub use readiness::{ReadinessIssue, ReadinessValidator};
pub use structural::{StructuralIssue, StructuralValidator};

/// Implements `Serialize` as the `Display` message.
macro_rules! serialize_as_message {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }
    };
}

serialize_as_message!(StructuralIssue);
serialize_as_message!(ReadinessIssue);
