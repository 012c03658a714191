mod jgloss;

pub use jgloss::JGlossUrlRewriter;

/// Rewrites URLs found in an HTML document for a new context.
pub trait UrlRewriter {
    /// Rewrite a URL found outside any particular tag.
    fn rewrite(&self, input: &str) -> anyhow::Result<String>;

    /// Rewrite a URL found in the named tag.
    fn rewrite_tagged(&self, input: &str, tag: &str) -> anyhow::Result<String>;

    /// Replace the base URL against which relative URLs are resolved.
    fn set_document_base(&mut self, doc_base: &str) -> anyhow::Result<()>;

    /// The base URL against which relative URLs are resolved.
    fn document_base(&self) -> String;
}
