mod rendered_result;

pub use rendered_result::RenderedResult;
