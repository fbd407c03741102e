mod console;
mod text;

pub use console::ConsoleReporter;
pub use text::TextCommandSink;
