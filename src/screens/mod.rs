pub mod console;

// The console is a single screen: resource menu, body region (list, action
// modal or log pane), error strip and a footer for key hints or status.

pub use console::render;
