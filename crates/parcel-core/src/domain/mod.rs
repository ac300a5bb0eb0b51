//! Domain model (envelope, qualified names, errors).

pub mod envelope;
pub mod errors;
pub mod qualified_name;

pub use self::envelope::{DATA_KEY, Envelope, RawEnvelope, TYPE_KEY};
pub use self::errors::{
    DeserializationError, DictError, ResolveError, SerializationError,
};
pub use self::qualified_name::{QualifiedName, QualifiedNameError};
