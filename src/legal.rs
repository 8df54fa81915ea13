//! License text surfaced at runtime for callers that need to display it
//! (e.g. an "About" dialog in a downstream application).

const MIT_NOTICE: &str = r#"vdtk
Copyright (c) 2026 The vdtk contributors

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to
deal in the Software without restriction, including without limitation the
rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
sell copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.

Third-party notices
--------------------
thiserror - MIT OR Apache-2.0, (c) David Tolnay.
log       - MIT OR Apache-2.0, (c) The Rust Project Developers.
"#;

/// Returns the full license and third-party attribution text.
pub fn legal_notice() -> &'static str {
    MIT_NOTICE
}

/// Writes the license and third-party attribution text to the log at info
/// level, for callers that just want it surfaced somewhere.
pub fn print_legal_notice() {
    for line in MIT_NOTICE.lines() {
        log::info!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_mentions_every_bundled_dependency() {
        let notice = legal_notice();
        assert!(notice.contains("thiserror"));
        assert!(notice.contains("log"));
    }
}
