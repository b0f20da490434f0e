// Services module
// Chat engine, reply streaming, mail delivery, intake and the widget client

pub mod chat;
pub mod intake;
pub mod mail;
pub mod stream;
pub mod widget;

pub use intake::{Intake, IntakeError, IntakeErrorCode, IntakeResult};
pub use stream::{paced_stream, StreamError, StreamPacing};
