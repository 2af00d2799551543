mod talk_archive;
pub use self::talk_archive::*;
mod file_talk_archive;
pub use self::file_talk_archive::*;
mod memory_talk_archive;
pub use self::memory_talk_archive::*;
mod archive_writer;
pub use self::archive_writer::*;
