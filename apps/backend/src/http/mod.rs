pub mod envelope;

pub use envelope::{Envelope, EnvelopeData, TokenData, UserData};
