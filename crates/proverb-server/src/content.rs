use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

/// Quote subject, drawn at random per request to keep generations varied.
pub const TOPICS: [&str; 26] = [
    "cuộc sống",
    "thành công",
    "động lực",
    "ước mơ",
    "công việc",
    "mối quan hệ",
    "sự tồn tại",
    "thành tựu",
    "mục tiêu",
    "hạnh phúc",
    "năng suất",
    "tự hoàn thiện",
    "cảm hứng",
    "bền bỉ",
    "tham vọng",
    "thất bại",
    "xã hội",
    "kỳ vọng",
    "sự nghiệp",
    "tiền bạc",
    "danh vọng",
    "tình yêu",
    "tình bạn",
    "gia đình",
    "sức khỏe",
    "tuổi tác",
];

/// Tone of voice for the generated quote.
pub const STYLES: [&str; 8] = [
    "thẳng thắn tàn nhẫn",
    "châm biếm dí dỏm",
    "hài hước đen tối",
    "hoài nghi hiện thực",
    "mỉa mai sắc sảo",
    "cay đắng hài hước",
    "chế giễu thông minh",
    "bi quan khôn ngoan",
];

/// Served whenever generation fails, so the endpoint always has a quote.
pub const FALLBACK_QUOTES: [&str; 15] = [
    "Bởi vì không gì nói 'thành tựu' hơn việc tham gia cuộc đua chuột.",
    "Mơ lớn, để thất vọng của bạn có thể ngoạn mục tương xứng.",
    "Thành công: nghệ thuật thuyết phục bản thân bạn không phải kẻ thất bại.",
    "Động lực là tạm thời, nhưng tầm thường là mãi mãi.",
    "Tại sao hướng tới những vì sao khi bạn có thể chấp nhận rãnh cống?",
    "Tiềm năng của bạn là vô hạn, có nghĩa là nó cũng vô nghĩa.",
    "Mỗi thất bại là một bước gần hơn đến việc chấp nhận bạn không đặc biệt.",
    "Tin vào bản thân, vì không ai khác sẽ làm thế.",
    "Cuộc sống quá ngắn để lãng phí vào những kỳ vọng phi thực tế.",
    "Kiên trì chỉ là bướng bỉnh với một đội ngũ marketing tốt hơn.",
    "Theo đuổi ước mơ của bạn, chúng biết đường đến thất vọng.",
    "Bạn bỏ lỡ 100% những cú đánh bạn không thực hiện, và hầu hết những cú bạn thực hiện.",
    "Làm việc chăm chỉ cuối cùng sẽ được đền đáp, nhưng lười biếng được đền đáp ngay.",
    "Điều duy nhất đứng giữa bạn và thành công là mọi thứ.",
    "Vùng thoải mái của bạn được gọi như vậy vì một lý do.",
];

/// Build a generation prompt around a random topic and style. The
/// timestamp and seed are included purely to discourage the model from
/// repeating itself across requests.
pub fn build_prompt(rng: &mut impl Rng) -> String {
    let topic = TOPICS[rng.random_range(0..TOPICS.len())];
    let style = STYLES[rng.random_range(0..STYLES.len())];
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seed: u32 = rng.random_range(0..100_000);

    format!(
        "Tạo một câu trích dẫn phản động lực {style} dưới 20 từ về {topic}. \
        Hãy làm cho nó bi quan độc đáo và đáng nhớ. Không được khuyến khích hoặc hy vọng. \
        Hãy sáng tạo và khác biệt với các câu trích dẫn thông thường. Thời gian: {timestamp}, Seed: {seed} \
        Chỉ trả về văn bản trích dẫn bằng TIẾNG VIỆT mà không có dấu ngoặc kép hoặc bất kỳ định dạng bổ sung nào."
    )
}

pub fn pick_fallback(rng: &mut impl Rng) -> &'static str {
    FALLBACK_QUOTES[rng.random_range(0..FALLBACK_QUOTES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_a_topic_and_a_style() {
        let mut rng = rand::rng();
        let prompt = build_prompt(&mut rng);

        assert!(TOPICS.iter().any(|t| prompt.contains(t)));
        assert!(STYLES.iter().any(|s| prompt.contains(s)));
        assert!(prompt.contains("TIẾNG VIỆT"));
    }

    #[test]
    fn fallback_is_drawn_from_the_canned_set() {
        let mut rng = rand::rng();
        for _ in 0..20 {
            let quote = pick_fallback(&mut rng);
            assert!(FALLBACK_QUOTES.contains(&quote));
        }
    }
}
