use std::collections::HashSet;

use anyhow::Context;
use url::Url;

use super::UrlRewriter;
use crate::forward::escape_url;
use crate::utils::log;

const LOG_NAME: &str = "rewriter";

/// Rewrites URLs found in a page so that requests are routed through the
/// forwarding servlet.
///
/// Relative URLs are made absolute against the page's base URL first. Only
/// link-like tags (`a`, `area`, `frame`, plus `form` when form data
/// forwarding is enabled) with a forwarded protocol are routed through the
/// servlet; everything else is returned resolved but untouched.
pub struct JGlossUrlRewriter {
    /// Servlet URL with the flag segment and trailing slash precomputed,
    /// ready to take an escaped payload.
    servlet_base: String,
    doc_base: Url,
    protocols: HashSet<String>,
    forward_form_data: bool,
}

impl JGlossUrlRewriter {
    /// `servlet_base` must not contain a trailing slash.
    pub fn new(
        servlet_base: &str,
        doc_base: Url,
        protocols: HashSet<String>,
        forward_cookies: bool,
        forward_form_data: bool,
    ) -> Self {
        let servlet_base = format!(
            "{}/{}{}/",
            servlet_base,
            if forward_cookies { '1' } else { '0' },
            if forward_form_data { '1' } else { '0' },
        );

        JGlossUrlRewriter {
            servlet_base,
            doc_base,
            protocols,
            forward_form_data,
        }
    }

    pub fn rewrite_forced(&self, input: &str) -> anyhow::Result<String> {
        self.rewrite_inner(input, None, true)
    }

    fn rewrite_inner(
        &self,
        input: &str,
        tag: Option<&str>,
        force_servlet_relative: bool,
    ) -> anyhow::Result<String> {
        if input.is_empty() {
            // rewriting an empty URL makes no sense
            return Ok(String::new());
        }

        let tag = tag.map(str::to_ascii_lowercase);
        if tag.as_deref() == Some("base") {
            // ignore BASE tags
            return Ok(input.to_string());
        }

        // make the URL absolute using the document base URL
        let target = self
            .doc_base
            .join(input)
            .with_context(|| format!("cannot resolve {input} against {}", self.doc_base))?;

        if force_servlet_relative || self.should_forward(tag.as_deref(), &target) {
            log::debug(LOG_NAME, &format!("forwarding {target}"));
            Ok(format!("{}{}", self.servlet_base, escape_url(target.as_str())?))
        } else {
            log::debug(LOG_NAME, &format!("passing through {target}"));
            Ok(target.into())
        }
    }

    fn should_forward(&self, tag: Option<&str>, target: &Url) -> bool {
        let tag_wants_forwarding = match tag {
            None => true,
            Some("a") | Some("area") | Some("frame") => true,
            Some("form") => self.forward_form_data,
            Some(_) => false,
        };

        tag_wants_forwarding && self.protocols.contains(target.scheme())
    }
}

impl UrlRewriter for JGlossUrlRewriter {
    fn rewrite(&self, input: &str) -> anyhow::Result<String> {
        self.rewrite_inner(input, None, false)
    }

    fn rewrite_tagged(&self, input: &str, tag: &str) -> anyhow::Result<String> {
        self.rewrite_inner(input, Some(tag), false)
    }

    fn set_document_base(&mut self, doc_base: &str) -> anyhow::Result<()> {
        self.doc_base = Url::parse(doc_base)
            .with_context(|| format!("invalid document base URL: {doc_base}"))?;
        Ok(())
    }

    fn document_base(&self) -> String {
        self.doc_base.to_string()
    }
}
