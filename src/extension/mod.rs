/// Browser-side entry points: the background script and the content script
pub mod background;
pub mod content;
