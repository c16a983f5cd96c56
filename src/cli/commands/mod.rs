//! One module per subcommand; each exposes `execute`.

pub mod add;
pub mod delete;
pub mod dump;
pub mod edit;
pub mod init;
pub mod list;
pub mod move_cmd;
pub mod passwd;
pub mod show;
