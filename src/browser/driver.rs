use crate::error::PageError;

/// The browser-session abstraction page objects are written against.
///
/// All element addressing is by CSS selector. `BrowserSession` implements
/// this over the Node.js driver process; tests implement it with a scripted
/// fake. Every method takes `&mut self` because the production transport is
/// a single request/response pipe.
pub trait Browser {
    /// Load a URL in the session's tab.
    fn navigate(&mut self, url: &str) -> Result<(), PageError>;

    /// Whether at least one element matching `selector` is rendered visible.
    fn is_visible(&mut self, selector: &str) -> Result<bool, PageError>;

    /// Whether at least one element matching `selector` exists in the DOM,
    /// visible or not.
    fn is_present(&mut self, selector: &str) -> Result<bool, PageError>;

    /// Text content of all visible elements matching `selector`, in
    /// document order. Empty when nothing matches.
    fn texts(&mut self, selector: &str) -> Result<Vec<String>, PageError>;

    /// Type `value` into the first element matching `selector`, replacing
    /// any existing content.
    fn fill(&mut self, selector: &str, value: &str) -> Result<(), PageError>;

    /// Click the first element matching `selector`.
    fn click(&mut self, selector: &str) -> Result<(), PageError>;

    /// Ensure the checkbox matching `selector` is checked.
    fn check(&mut self, selector: &str) -> Result<(), PageError>;

    /// Select the option with the given `value` in the `<select>` matching
    /// `selector`.
    fn select_option(&mut self, selector: &str, value: &str) -> Result<(), PageError>;
}
