mod actor;

pub use actor::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER, actor};
