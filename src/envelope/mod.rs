pub mod elliptic;

pub use elliptic::{EllipticEnvelope, EnvelopeLabel};
