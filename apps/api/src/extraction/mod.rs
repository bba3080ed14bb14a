// Company page extraction: URL validation and the bounded best-effort text extractor.
// Nothing here talks to the generation service.

pub mod page;
pub mod url_validator;
