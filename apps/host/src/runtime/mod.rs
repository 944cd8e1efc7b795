//! Live session runtime: the tokio task that owns a session and the sinks it
//! reports to.

pub mod session_task;
pub mod sink;

pub use session_task::{spawn_session, HostCommand, OperatorNotice, SessionHandle};
pub use sink::{LogSink, SessionSink};
