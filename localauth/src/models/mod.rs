pub mod attempt;
pub mod biometry;
pub mod policy;

pub use attempt::AuthAttempt;
pub use biometry::BiometryType;
pub use policy::Policy;
