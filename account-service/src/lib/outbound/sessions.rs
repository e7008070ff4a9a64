pub mod context;
pub mod memory;

pub use context::SessionChange;
pub use context::SessionIdentityContext;
pub use memory::InMemorySessionStore;
