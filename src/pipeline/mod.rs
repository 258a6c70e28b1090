//! Recognition orchestrator
//!
//! Sequences the pipeline: QR parsing first, OCR field recovery as the
//! fallback, classification in every branch. External collaborators (QR
//! symbol detection, OCR engines, persistence) are injected through the
//! traits below; the orchestrator owns the control flow and the error
//! surface, not the recognition backends.

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::capture::frame::PixelBuffer;
use crate::classify::classify_invoice;
use crate::error::RecognitionError;
use crate::invoice::{Invoice, OcrText, RecognitionInput};
use crate::parse::{parse_qr_set, recover_fields};

/// OCR recognition profile requested from the collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrProfile {
    /// Profile-A: mixed Traditional-Chinese + Latin text (merchant wording,
    /// item names).
    General,
    /// Profile-B: Latin letters + digits with a restricted whitelist
    /// (amounts, dates, invoice number).
    AmountDigits,
}

/// External QR symbol detector. Returns the raw decoded payload strings
/// found in a frame, zero or more.
pub trait QrDetector {
    fn detect_qr_strings(&self, frame: &PixelBuffer) -> anyhow::Result<Vec<String>>;
}

/// External OCR engine. Returns the raw recognized text for one profile
/// invocation.
pub trait TextRecognizer {
    fn recognize_text(&self, frame: &PixelBuffer, profile: OcrProfile) -> anyhow::Result<String>;
}

/// External invoice persistence. Fire-and-forget from the pipeline's
/// perspective: a store failure is logged and never invalidates a
/// successful recognition.
pub trait InvoiceStore {
    fn store(&self, invoice: &Invoice) -> anyhow::Result<()>;
}

/// The recognition pipeline entry point.
///
/// Collaborators are optional: the pre-extracted signal paths
/// ([`RecognitionInput::QrPayloads`], [`RecognitionInput::OcrText`]) need
/// none, and an OCR-only deployment may omit the QR detector. The image path
/// requires at least a text recognizer.
#[derive(Default)]
pub struct Recognizer {
    qr_detector: Option<Box<dyn QrDetector>>,
    text_recognizer: Option<Box<dyn TextRecognizer>>,
    store: Option<Box<dyn InvoiceStore>>,
}

impl Recognizer {
    /// A recognizer with no collaborators, serving the pre-extracted signal
    /// paths only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a QR symbol detector for the image path.
    pub fn with_qr_detector(mut self, detector: impl QrDetector + 'static) -> Self {
        self.qr_detector = Some(Box::new(detector));
        self
    }

    /// Attach an OCR engine for the image path.
    pub fn with_text_recognizer(mut self, recognizer: impl TextRecognizer + 'static) -> Self {
        self.text_recognizer = Some(Box::new(recognizer));
        self
    }

    /// Attach a persistence collaborator, invoked after classification.
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Run the full pipeline on one recognition request.
    ///
    /// Every branch ends in classification. Note the asymmetry with the
    /// components themselves: blank OCR text fed here is a recognition
    /// failure ([`RecognitionError::NoContentRecognized`]), while the field
    /// recovery component in isolation returns a valid degenerate draft for
    /// the same input.
    pub fn recognize(&self, input: RecognitionInput) -> Result<Invoice, RecognitionError> {
        let draft = match input {
            RecognitionInput::QrPayloads(payloads) => {
                debug!("Recognizing from {} pre-decoded QR payload(s)", payloads.len());
                parse_qr_set(&payloads)?
            }
            RecognitionInput::OcrText(text) => {
                debug!("Recognizing from pre-extracted OCR text");
                if text.is_blank() {
                    return Err(RecognitionError::NoContentRecognized);
                }
                recover_fields(&text)
            }
            RecognitionInput::Image(frame) => self.recognize_frame(&frame)?,
        };

        let invoice = classify_invoice(draft);
        info!(
            "Recognized invoice {} ({:?}, {} item(s), category {})",
            invoice.number,
            invoice.source,
            invoice.items.len(),
            invoice.category.key()
        );

        if let Some(store) = &self.store {
            if let Err(err) = store.store(&invoice) {
                warn!("Invoice store failed, recognition result unaffected: {err:#}");
            }
        }

        Ok(invoice)
    }

    /// Image branch: QR detection first, dual-profile OCR on a QR miss.
    fn recognize_frame(&self, frame: &PixelBuffer) -> Result<Invoice, RecognitionError> {
        if let Some(detector) = &self.qr_detector {
            let payloads = detector
                .detect_qr_strings(frame)
                .map_err(RecognitionError::QrDetection)?;
            if !payloads.is_empty() {
                debug!("QR detector yielded {} payload(s)", payloads.len());
                return parse_qr_set(&payloads);
            }
            debug!("No QR symbols found, falling back to OCR");
        } else {
            debug!("No QR detector configured, going straight to OCR");
        }

        let recognizer = self
            .text_recognizer
            .as_ref()
            .ok_or_else(|| RecognitionError::Ocr(anyhow!("no text recognizer configured")))?;

        let text = run_dual_ocr(recognizer.as_ref(), frame)?;
        if text.is_blank() {
            return Err(RecognitionError::NoContentRecognized);
        }
        Ok(recover_fields(&text))
    }
}

/// Run both OCR profiles. A failure in one profile is logged and must not
/// block use of the other; only both failing surfaces an error.
fn run_dual_ocr(
    recognizer: &dyn TextRecognizer,
    frame: &PixelBuffer,
) -> Result<OcrText, RecognitionError> {
    let general = recognizer.recognize_text(frame, OcrProfile::General);
    let digits = recognizer.recognize_text(frame, OcrProfile::AmountDigits);

    match (general, digits) {
        (Ok(general), Ok(digits)) => Ok(OcrText::dual(general, digits)),
        (Ok(general), Err(err)) => {
            warn!("AmountDigits OCR profile failed: {err:#}");
            Ok(OcrText {
                general: Some(general),
                digits: None,
            })
        }
        (Err(err), Ok(digits)) => {
            warn!("General OCR profile failed: {err:#}");
            Ok(OcrText {
                general: None,
                digits: Some(digits),
            })
        }
        (Err(first), Err(second)) => {
            warn!("General OCR profile failed: {first:#}");
            Err(RecognitionError::Ocr(second))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Category;
    use std::sync::{Arc, Mutex};

    const HEADER: &str =
        "DF622694131110708397000000003000000030000000008547587XKsayZY706hvyFpe6k3TQ==";
    const ITEMS: &str = "**********:2:2:1:野川蛋黃派10粒:1:65:可口可樂1250CC:1:38";

    fn frame() -> PixelBuffer {
        PixelBuffer::new(vec![255; 4 * 4 * 3], 4, 4)
    }

    struct FixedDetector(Vec<String>);

    impl QrDetector for FixedDetector {
        fn detect_qr_strings(&self, _frame: &PixelBuffer) -> anyhow::Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FixedOcr {
        general: anyhow::Result<String>,
        digits: anyhow::Result<String>,
    }

    impl FixedOcr {
        fn ok(general: &str, digits: &str) -> Self {
            Self {
                general: Ok(general.into()),
                digits: Ok(digits.into()),
            }
        }
    }

    impl TextRecognizer for FixedOcr {
        fn recognize_text(
            &self,
            _frame: &PixelBuffer,
            profile: OcrProfile,
        ) -> anyhow::Result<String> {
            let result = match profile {
                OcrProfile::General => &self.general,
                OcrProfile::AmountDigits => &self.digits,
            };
            match result {
                Ok(text) => Ok(text.clone()),
                Err(err) => Err(anyhow!("{err}")),
            }
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        stored: Mutex<Vec<String>>,
        fail: bool,
    }

    impl InvoiceStore for Arc<RecordingStore> {
        fn store(&self, invoice: &Invoice) -> anyhow::Result<()> {
            self.stored.lock().unwrap().push(invoice.number.clone());
            if self.fail {
                Err(anyhow!("sheet sync unavailable"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_qr_path_parses_and_classifies() {
        let input =
            RecognitionInput::QrPayloads(vec![HEADER.to_string(), ITEMS.to_string()]);
        let invoice = Recognizer::new().recognize(input).unwrap();

        assert_eq!(invoice.number, "DF62269413");
        assert_eq!(invoice.items.len(), 2);
        // 蛋黃派 resolves Snack, 可樂 resolves Drink, both Food.
        assert_eq!(invoice.category, Category::Food);
    }

    #[test]
    fn test_empty_qr_set_is_a_caller_error() {
        let result = Recognizer::new().recognize(RecognitionInput::QrPayloads(vec![]));
        assert!(matches!(result, Err(RecognitionError::EmptyQrSet)));
    }

    #[test]
    fn test_blank_ocr_text_is_a_recognition_failure() {
        let result = Recognizer::new()
            .recognize(RecognitionInput::OcrText(OcrText::combined("  \n ")));
        assert!(matches!(result, Err(RecognitionError::NoContentRecognized)));

        // The same input fed to field recovery in isolation is valid.
        let degenerate = recover_fields(&OcrText::combined("  \n "));
        assert_eq!(degenerate.number, "");
        assert_eq!(degenerate.total, 0.0);
    }

    #[test]
    fn test_ocr_text_path() {
        let input = RecognitionInput::OcrText(OcrText::combined(
            "發票號碼: BB87654321\n日期: 111年7月8日\n總計: 800",
        ));
        let invoice = Recognizer::new().recognize(input).unwrap();

        assert_eq!(invoice.number, "BB87654321");
        assert_eq!(invoice.total, 800.0);
        assert_eq!(invoice.category, Category::Other); // no items to classify
    }

    #[test]
    fn test_image_path_prefers_qr() {
        let recognizer = Recognizer::new()
            .with_qr_detector(FixedDetector(vec![HEADER.into(), ITEMS.into()]))
            .with_text_recognizer(FixedOcr::ok("should not be used", "should not be used"));

        let invoice = recognizer
            .recognize(RecognitionInput::Image(frame()))
            .unwrap();
        assert_eq!(invoice.source, crate::invoice::InvoiceSource::Qr);
        assert_eq!(invoice.number, "DF62269413");
    }

    #[test]
    fn test_image_path_falls_back_to_ocr_on_qr_miss() {
        let recognizer = Recognizer::new()
            .with_qr_detector(FixedDetector(vec![]))
            .with_text_recognizer(FixedOcr::ok("全家便利商店", "BB87654321 111/07/08"));

        let invoice = recognizer
            .recognize(RecognitionInput::Image(frame()))
            .unwrap();
        assert_eq!(invoice.source, crate::invoice::InvoiceSource::Paper);
        assert_eq!(invoice.number, "BB87654321");
    }

    #[test]
    fn test_one_failed_ocr_profile_does_not_block_the_other() {
        let recognizer = Recognizer::new().with_text_recognizer(FixedOcr {
            general: Err(anyhow!("profile crashed")),
            digits: Ok("CC11223344 總計: 99".into()),
        });

        let invoice = recognizer
            .recognize(RecognitionInput::Image(frame()))
            .unwrap();
        assert_eq!(invoice.number, "CC11223344");
        assert_eq!(invoice.total, 99.0);
    }

    #[test]
    fn test_both_ocr_profiles_failing_surfaces_error() {
        let recognizer = Recognizer::new().with_text_recognizer(FixedOcr {
            general: Err(anyhow!("profile crashed")),
            digits: Err(anyhow!("profile crashed")),
        });

        let result = recognizer.recognize(RecognitionInput::Image(frame()));
        assert!(matches!(result, Err(RecognitionError::Ocr(_))));
    }

    #[test]
    fn test_blank_dual_ocr_output_is_no_content() {
        let recognizer = Recognizer::new().with_text_recognizer(FixedOcr::ok("", " "));
        let result = recognizer.recognize(RecognitionInput::Image(frame()));
        assert!(matches!(result, Err(RecognitionError::NoContentRecognized)));
    }

    #[test]
    fn test_store_is_fire_and_forget() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        let recognizer = Recognizer::new().with_store(Arc::clone(&store));

        let invoice = recognizer
            .recognize(RecognitionInput::QrPayloads(vec![HEADER.into()]))
            .unwrap();

        // The store was invoked, failed, and the result is still returned.
        assert_eq!(
            store.stored.lock().unwrap().clone(),
            vec!["DF62269413".to_string()]
        );
        assert_eq!(invoice.number, "DF62269413");
    }
}
