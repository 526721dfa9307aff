mod ocr;

pub use ocr::{OcrEngine, OcrWorker};
