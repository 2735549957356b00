mod state;
pub use self::state::{Phase, SessionError, SessionState};

mod store;
pub use self::store::{FileStore, MemoryStore, SessionStore};

mod reader;
pub use self::reader::SessionReader;
