//! Photo crop modal: the element-tree side of the [`crop`] pipeline.
//!
//! Expected markup, for a modal with id `foto`:
//!
//! | element id               | role                                  |
//! |--------------------------|---------------------------------------|
//! | `upload-section-foto`    | file picker area, hidden once loaded  |
//! | `cropper-container-foto` | crop UI, shown once loaded            |
//! | `cropper-image-foto`     | `<img>` receiving the upload          |
//! | `cropper-image-area-foto`| box whose height is set               |
//! | `preview-foto`           | optional 120x120 preview `<img>`      |
//! | `btn-submit-foto`        | save button, enabled once loaded      |
//! | `foto-base64-foto`       | hidden input receiving the JPEG       |
//! | `form-foto`              | the form that is submitted            |
//! | `input-foto`             | optional `<input type=file>`          |

use crate::dom_ext::{set_disabled, set_hidden};
use crop::{
    CommitOptions, ContainerSize, CropError, CropSession, ImageFile, ImageLoader, JPEG_QUALITY,
    ModalMetrics, PendingImage, PreparedImage, available_area_height, estimated_area_height,
};
use dom::{Document, Id};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropModalIds {
    pub upload_section: String,
    pub cropper_container: String,
    pub cropper_image: String,
    pub cropper_image_area: String,
    pub preview: String,
    pub btn_submit: String,
    pub foto_base64: String,
    pub form: String,
    pub input: String,
}

impl CropModalIds {
    pub fn new(modal_id: &str) -> Self {
        Self {
            upload_section: format!("upload-section-{modal_id}"),
            cropper_container: format!("cropper-container-{modal_id}"),
            cropper_image: format!("cropper-image-{modal_id}"),
            cropper_image_area: format!("cropper-image-area-{modal_id}"),
            preview: format!("preview-{modal_id}"),
            btn_submit: format!("btn-submit-{modal_id}"),
            foto_base64: format!("foto-base64-{modal_id}"),
            form: format!("form-{modal_id}"),
            input: format!("input-{modal_id}"),
        }
    }
}

/// One crop modal. Holds at most one image and one session.
pub struct CropModal {
    modal_id: String,
    ids: CropModalIds,
    aspect_ratio: f64,
    max_size_mb: f64,
    prepared: Option<PreparedImage>,
    session: Option<CropSession>,
    pending: Option<PendingImage>,
}

impl CropModal {
    pub fn new(modal_id: impl Into<String>, aspect_ratio: f64, max_size_mb: f64) -> Self {
        let modal_id = modal_id.into();
        Self {
            ids: CropModalIds::new(&modal_id),
            modal_id,
            aspect_ratio,
            max_size_mb,
            prepared: None,
            session: None,
            pending: None,
        }
    }

    pub fn modal_id(&self) -> &str {
        &self.modal_id
    }

    pub fn ids(&self) -> &CropModalIds {
        &self.ids
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some() || self.session.is_some()
    }

    pub fn session(&self) -> Option<&CropSession> {
        self.session.as_ref()
    }

    /// For moving and resizing the box. Call
    /// [`refresh_preview`](Self::refresh_preview) afterwards.
    pub fn session_mut(&mut self) -> Option<&mut CropSession> {
        self.session.as_mut()
    }

    fn find(&self, doc: &Document, dom_id: &str) -> Option<Id> {
        doc.element_by_dom_id(dom_id)
    }

    /// Validate and decode `file` on this thread, then show it in the modal.
    ///
    /// On error the modal is left as it was, apart from clearing the file
    /// input so the same file can be picked again.
    pub fn load(
        &mut self,
        doc: &mut Document,
        file: Option<ImageFile>,
        viewport_height: f32,
    ) -> Result<(), CropError> {
        self.pending = None;
        let result = crop::prepare(file, self.max_size_mb);
        self.finish_load(doc, result, viewport_height)
    }

    /// Like [`load`](Self::load), but the decode runs on a worker thread.
    /// Drive it with [`poll_load`](Self::poll_load).
    pub fn start_load(&mut self, file: Option<ImageFile>) {
        self.pending = Some(ImageLoader::spawn(file, self.max_size_mb));
    }

    /// `None` while nothing finished (or nothing was started).
    pub fn poll_load(
        &mut self,
        doc: &mut Document,
        viewport_height: f32,
    ) -> Option<Result<(), CropError>> {
        let result = self.pending.as_mut()?.poll()?;
        self.pending = None;
        Some(self.finish_load(doc, result, viewport_height))
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    fn finish_load(
        &mut self,
        doc: &mut Document,
        result: Result<PreparedImage, CropError>,
        viewport_height: f32,
    ) -> Result<(), CropError> {
        let prepared = match result {
            Ok(prepared) => prepared,
            Err(err) => {
                log::debug!(target: "forms", "crop modal {:?}: load failed: {err}", self.modal_id);
                if let Some(input) = self.find(doc, &self.ids.input) {
                    doc.remove_attr(input, "value");
                }
                return Err(err);
            }
        };

        if let Some(upload) = self.find(doc, &self.ids.upload_section) {
            set_hidden(doc, upload, true);
        }
        if let Some(container) = self.find(doc, &self.ids.cropper_container) {
            set_hidden(doc, container, false);
        }
        if let Some(btn) = self.find(doc, &self.ids.btn_submit) {
            set_disabled(doc, btn, false);
        }
        if let Some(img) = self.find(doc, &self.ids.cropper_image) {
            doc.set_attr(img, "src", &prepared.source_data_url());
        }
        if let Some(area) = self.find(doc, &self.ids.cropper_image_area) {
            set_height(doc, area, estimated_area_height(viewport_height));
        }

        log::debug!(
            target: "forms",
            "crop modal {:?}: loaded {:?} ({}x{})",
            self.modal_id,
            prepared.name(),
            prepared.width(),
            prepared.height()
        );
        self.session = None;
        self.prepared = Some(prepared);
        Ok(())
    }

    /// Start (or restart) the crop session once the modal is visible.
    ///
    /// `metrics` is the measured modal chrome; without it the area falls
    /// back to a fixed height.
    pub fn initialize(
        &mut self,
        doc: &mut Document,
        container: ContainerSize,
        metrics: Option<&ModalMetrics>,
    ) -> Result<(), CropError> {
        if !self.is_prepared() {
            log::error!(target: "forms", "crop modal {:?}: no image prepared", self.modal_id);
            return Err(CropError::NotPrepared);
        }
        if !container.is_ready() {
            return Err(CropError::ContainerNotReady);
        }

        if let Some(area) = self.find(doc, &self.ids.cropper_image_area) {
            set_height(doc, area, available_area_height(metrics));
        }

        let image = match (self.prepared.take(), self.session.take()) {
            (Some(image), _) => image,
            (None, Some(old)) => old.image().clone(),
            (None, None) => return Err(CropError::NotPrepared),
        };
        self.session = Some(CropSession::initialize(image, self.aspect_ratio, container)?);
        self.refresh_preview(doc)
    }

    /// Redraw the preview `<img>` from the current crop box, if both exist.
    pub fn refresh_preview(&self, doc: &mut Document) -> Result<(), CropError> {
        let (Some(session), Some(preview)) = (&self.session, self.find(doc, &self.ids.preview))
        else {
            return Ok(());
        };
        let url = session.preview().to_jpeg_data_url(JPEG_QUALITY)?;
        doc.set_attr(preview, "src", &url);
        Ok(())
    }

    /// Encode the selection and put it in the hidden `foto-base64-*` input.
    /// Returns the data URL.
    pub fn submit(&self, doc: &mut Document) -> Result<String, CropError> {
        let Some(session) = &self.session else {
            log::warn!(target: "forms", "crop modal {:?}: submit without a selection", self.modal_id);
            return Err(CropError::NoSelection);
        };

        let url = session
            .commit(&CommitOptions::default())
            .to_jpeg_data_url(JPEG_QUALITY)?;
        match self.find(doc, &self.ids.foto_base64) {
            Some(field) => {
                doc.set_attr(field, "value", &url);
            }
            None => log::warn!(target: "forms", "crop modal {:?}: no hidden photo field", self.modal_id),
        }
        Ok(url)
    }

    /// Back to the initial state: upload visible, cropper hidden, submit
    /// disabled, no image.
    pub fn reset(&mut self, doc: &mut Document) {
        self.prepared = None;
        self.session = None;
        self.pending = None;

        if let Some(upload) = self.find(doc, &self.ids.upload_section) {
            set_hidden(doc, upload, false);
        }
        if let Some(container) = self.find(doc, &self.ids.cropper_container) {
            set_hidden(doc, container, true);
        }
        if let Some(input) = self.find(doc, &self.ids.input) {
            doc.remove_attr(input, "value");
        }
        if let Some(btn) = self.find(doc, &self.ids.btn_submit) {
            set_disabled(doc, btn, true);
        }
        log::debug!(target: "forms", "crop modal {:?} reset", self.modal_id);
    }
}

fn set_height(doc: &mut Document, id: Id, height: f32) {
    doc.set_attr(id, "style", &format!("height: {height}px"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::Node;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::from_pixel(w, h, Rgba([200, 10, 10, 255]))
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn modal_doc() -> Document {
        Document::from_children(vec![
            Node::element("div").with_attr("id", "upload-section-m"),
            Node::element("div")
                .with_attr("id", "cropper-container-m")
                .with_attr("class", "d-none")
                .with_child(Node::element("div").with_attr("id", "cropper-image-area-m"))
                .with_child(Node::element("img").with_attr("id", "cropper-image-m")),
            Node::element("img").with_attr("id", "preview-m"),
            Node::element("form")
                .with_attr("id", "form-m")
                .with_child(
                    Node::element("input")
                        .with_attr("id", "foto-base64-m")
                        .with_attr("type", "hidden"),
                )
                .with_child(
                    Node::element("button")
                        .with_attr("id", "btn-submit-m")
                        .with_flag("disabled"),
                ),
        ])
    }

    fn el(doc: &Document, id: &str) -> Id {
        doc.element_by_dom_id(id).unwrap()
    }

    #[test]
    fn load_swaps_sections_and_sizes_area() {
        let mut doc = modal_doc();
        let mut modal = CropModal::new("m", 1.0, 5.0);
        let file = ImageFile::new("a.png", "image/png", png(30, 20));
        modal.load(&mut doc, Some(file), 1000.0).unwrap();

        assert!(doc.has_class(el(&doc, "upload-section-m"), "d-none"));
        assert!(!doc.has_class(el(&doc, "cropper-container-m"), "d-none"));
        assert!(!doc.has_attr(el(&doc, "btn-submit-m"), "disabled"));
        assert!(doc
            .attr(el(&doc, "cropper-image-m"), "src")
            .is_some_and(|s| s.starts_with("data:image/png;base64,")));
        assert_eq!(doc.attr(el(&doc, "cropper-image-area-m"), "style"), Some("height: 500px"));
    }

    #[test]
    fn rejected_file_leaves_ui_alone() {
        let mut doc = modal_doc();
        let mut modal = CropModal::new("m", 1.0, 5.0);
        let err = modal
            .load(&mut doc, Some(ImageFile::new("a.txt", "text/plain", b"hi".to_vec())), 800.0)
            .unwrap_err();
        assert!(matches!(err, CropError::NotAnImage));
        assert!(!doc.has_class(el(&doc, "upload-section-m"), "d-none"));
        assert!(doc.has_attr(el(&doc, "btn-submit-m"), "disabled"));
        assert!(!modal.is_prepared());
    }

    #[test]
    fn initialize_requires_an_image() {
        let mut doc = modal_doc();
        let mut modal = CropModal::new("m", 1.0, 5.0);
        let err = modal
            .initialize(&mut doc, ContainerSize::new(400.0, 400.0), None)
            .unwrap_err();
        assert!(matches!(err, CropError::NotPrepared));
    }

    #[test]
    fn submit_fills_hidden_field() {
        let mut doc = modal_doc();
        let mut modal = CropModal::new("m", 1.0, 5.0);
        assert!(matches!(modal.submit(&mut doc), Err(CropError::NoSelection)));

        modal
            .load(&mut doc, Some(ImageFile::new("a.png", "image/png", png(50, 50))), 800.0)
            .unwrap();
        modal
            .initialize(&mut doc, ContainerSize::new(400.0, 400.0), None)
            .unwrap();
        assert_eq!(doc.attr(el(&doc, "cropper-image-area-m"), "style"), Some("height: 300px"));
        assert!(doc
            .attr(el(&doc, "preview-m"), "src")
            .is_some_and(|s| s.starts_with("data:image/jpeg;base64,")));

        let url = modal.submit(&mut doc).unwrap();
        assert_eq!(doc.attr(el(&doc, "foto-base64-m"), "value"), Some(url.as_str()));

        modal.reset(&mut doc);
        assert!(!doc.has_class(el(&doc, "upload-section-m"), "d-none"));
        assert!(doc.has_class(el(&doc, "cropper-container-m"), "d-none"));
        assert!(doc.has_attr(el(&doc, "btn-submit-m"), "disabled"));
        assert!(modal.session().is_none());
    }

    #[test]
    fn background_load_resolves_once() {
        let mut doc = modal_doc();
        let mut modal = CropModal::new("m", 1.0, 5.0);
        modal.start_load(Some(ImageFile::new("a.png", "image/png", png(8, 8))));

        let mut result = None;
        for _ in 0..500 {
            if let Some(r) = modal.poll_load(&mut doc, 800.0) {
                result = Some(r);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(result.expect("decode finished").is_ok());
        assert!(modal.is_prepared());
        assert!(!modal.is_loading());
        assert!(modal.poll_load(&mut doc, 800.0).is_none());
    }
}
