/// Interface to the document renderer that produces page images
///
/// Decoding and rasterization live behind [`PageRenderer`]; this crate only
/// fixes the contract. Every call resolves to a single result and failures are
/// never retried here.
use std::future::Future;

/// Scale pages are rendered at when the caller has no preference.
pub const DEFAULT_RENDER_SCALE: f64 = 2.0;

/// Where a document is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Bytes(Vec<u8>),
}

impl From<&str> for DocumentSource {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<Vec<u8>> for DocumentSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// A rendered page, addressed by a URI the view layer can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub uri: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Called outside a rendering-capable environment.
    #[error("rendering is not supported in this environment: {0}")]
    Environment(String),

    /// No drawing surface could be obtained.
    #[error("drawing surface not available")]
    Surface,

    /// The rendered surface could not be exported as an image.
    #[error("image export failed: {0}")]
    Encoding(String),

    /// The document could not be loaded or decoded.
    #[error("document error: {0}")]
    Document(String),

    /// Pages are numbered from 1.
    #[error("page {page} out of range (document has {count} pages)")]
    PageOutOfRange { page: u32, count: u32 },
}

/// Check a 1-based page number against a page count.
pub fn check_page(page: u32, count: u32) -> Result<(), RenderError> {
    if page == 0 || page > count {
        return Err(RenderError::PageOutOfRange { page, count });
    }
    Ok(())
}

pub trait PageRenderer {
    type Document;

    fn load(
        &self,
        source: DocumentSource,
    ) -> impl Future<Output = Result<Self::Document, RenderError>>;

    fn page_count(&self, document: &Self::Document) -> u32;

    /// Render the 1-based `page` at `scale`.
    fn render_page(
        &self,
        document: &Self::Document,
        page: u32,
        scale: f64,
    ) -> impl Future<Output = Result<PageImage, RenderError>>;

    /// Render every page in order, stopping at the first failure.
    fn render_pages(
        &self,
        document: &Self::Document,
        scale: f64,
    ) -> impl Future<Output = Result<Vec<PageImage>, RenderError>> {
        async move {
            let count = self.page_count(document);
            let mut pages = Vec::with_capacity(count as usize);
            for page in 1..=count {
                pages.push(self.render_page(document, page, scale).await?);
            }
            Ok(pages)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeDocument {
        pages: u32,
    }

    /// Renders `pages` pages from byte sources; fails on page `broken`.
    struct FakeRenderer {
        broken: Option<u32>,
        calls: Cell<u32>,
    }

    impl FakeRenderer {
        fn new(broken: Option<u32>) -> Self {
            Self {
                broken,
                calls: Cell::new(0),
            }
        }
    }

    impl PageRenderer for FakeRenderer {
        type Document = FakeDocument;

        async fn load(&self, source: DocumentSource) -> Result<FakeDocument, RenderError> {
            match source {
                DocumentSource::Bytes(bytes) if !bytes.is_empty() => Ok(FakeDocument {
                    pages: bytes.len() as u32,
                }),
                DocumentSource::Bytes(_) => Err(RenderError::Document("empty document".into())),
                DocumentSource::Url(url) => Err(RenderError::Environment(url)),
            }
        }

        fn page_count(&self, document: &FakeDocument) -> u32 {
            document.pages
        }

        async fn render_page(
            &self,
            document: &FakeDocument,
            page: u32,
            scale: f64,
        ) -> Result<PageImage, RenderError> {
            self.calls.set(self.calls.get() + 1);
            check_page(page, document.pages)?;
            if self.broken == Some(page) {
                return Err(RenderError::Encoding(format!("page {page}")));
            }
            Ok(PageImage {
                width: (100.0 * scale) as u32,
                height: (140.0 * scale) as u32,
                uri: format!("blob:page-{page}"),
            })
        }
    }

    #[test]
    fn test_load_and_render() {
        let renderer = FakeRenderer::new(None);
        let document = pollster::block_on(renderer.load(vec![0u8; 3].into())).unwrap();
        let image =
            pollster::block_on(renderer.render_page(&document, 1, DEFAULT_RENDER_SCALE)).unwrap();
        assert_eq!(image.width, 200);
        assert_eq!(image.uri, "blob:page-1");
    }

    #[test]
    fn test_load_failures() {
        let renderer = FakeRenderer::new(None);
        let err = pollster::block_on(renderer.load("/book.pdf".into())).err();
        assert_eq!(err, Some(RenderError::Environment("/book.pdf".into())));
        let err = pollster::block_on(renderer.load(Vec::<u8>::new().into())).err();
        assert!(matches!(err, Some(RenderError::Document(_))));
    }

    #[test]
    fn test_pages_are_one_based() {
        assert_eq!(
            check_page(0, 4),
            Err(RenderError::PageOutOfRange { page: 0, count: 4 })
        );
        assert!(check_page(1, 4).is_ok());
        assert!(check_page(4, 4).is_ok());
        assert!(check_page(5, 4).is_err());
    }

    #[test]
    fn test_render_pages_stops_at_first_failure() {
        let renderer = FakeRenderer::new(Some(2));
        let document = pollster::block_on(renderer.load(vec![0u8; 5].into())).unwrap();
        let err = pollster::block_on(renderer.render_pages(&document, 1.0)).unwrap_err();
        assert_eq!(err, RenderError::Encoding("page 2".into()));
        assert_eq!(renderer.calls.get(), 2);

        let renderer = FakeRenderer::new(None);
        let pages = pollster::block_on(renderer.render_pages(&document, 1.0)).unwrap();
        assert_eq!(pages.len(), 5);
        assert_eq!(pages[4].uri, "blob:page-5");
    }
}
