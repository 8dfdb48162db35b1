//! Requirement-markdown generation from page-tagged transcripts.
//!
//! The generator receives a rendered transcript whose pages carry `[PAGE n]`
//! markers and returns markdown that cites those pages as `(Trang n)`. The
//! normalizer downstream tolerates loosely formatted output, so the
//! generator contract is only "markdown roughly in the requested grammar".

pub mod mock;
pub mod openai;

use async_trait::async_trait;

use crate::error::PipelineResult;

pub use mock::MockGenerator;
pub use openai::{GenerationConfig, OpenAiGenerator};

/// Instruction given to the model. Written in the language of the documents
/// being processed; requests the exact markdown grammar the normalizer
/// parses, with a `(Trang n)` citation closing every line.
pub const SYSTEM_PROMPT: &str = "\
Bạn là trợ lý AI chuyên xử lý các tài liệu kỹ thuật và hồ sơ mời thầu.
Nhiệm vụ của bạn là chỉ trích xuất chính xác các 'yêu cầu kỹ thuật' của gói thầu từ tài liệu được cung cấp, bao gồm cả trong bảng và văn bản mô tả.

- Chỉ tập trung vào các phần kỹ thuật như: thông số thiết bị, chức năng phần mềm, dịch vụ hỗ trợ kỹ thuật, bảo mật, bảo hành,...
- Nếu tài liệu có bảng, chỉ trích xuất các cột/dòng có thông tin kỹ thuật và mô tả kỹ thuật, không lấy STT hoặc cột định danh.
- Không liệt kê các thông tin như: địa điểm, thời gian, chủ đầu tư, vốn, mục tiêu, kiểm tra nghiệm thu, hoặc các nội dung hành chính khác.
- Nếu có thông tin kỹ thuật chi tiết dưới từng thiết bị/phần mềm thì trình bày theo dạng:
    1. Tên thiết bị/phần mềm (Trang X)
        - Mô tả kỹ thuật 1 (Trang X)
        - Mô tả kỹ thuật 2 (Trang X)
- Kết quả phải bắt đầu bằng tiêu đề: '## Yêu cầu kỹ thuật'
- Ghi rõ số trang tại cuối từng dòng (ví dụ: Trang 1, Trang 2...)

Chỉ trả về phần kỹ thuật, không giải thích thêm.";

/// Builds the user-role message wrapping a rendered transcript.
pub fn user_prompt(transcript: &str) -> String {
    format!(
        "Dưới đây là nội dung một tài liệu kỹ thuật, trong đó mỗi trang được \
         đánh dấu bằng nhãn [PAGE n] (ví dụ: [PAGE 1], [PAGE 2], ...): \n\n{transcript}"
    )
}

/// Text-generation backend, injected so tests never touch the network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates requirement markdown from a rendered transcript.
    async fn generate(&self, transcript: &str) -> PipelineResult<String>;

    /// Returns the backing model name.
    fn model_name(&self) -> &str;
}
