pub mod admin;
pub mod barangay;
pub mod household;
pub mod municipality;
pub mod resident;
pub mod zone;

pub use admin::{AdminAccount, AdminRole};
pub use barangay::Barangay;
pub use household::Household;
pub use municipality::Municipality;
pub use resident::Resident;
pub use zone::Zone;
