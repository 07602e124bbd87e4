//! Built-in sample articles for trying the summarizer without pasting text.

/// A titled sample article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleArticle {
    pub title: &'static str,
    pub content: &'static str,
}

pub const SAMPLE_ARTICLES: &[SampleArticle] = &[
    SampleArticle {
        title: "Climate Change",
        content: "Climate change continues to pose significant challenges worldwide as global temperatures rise and weather patterns become increasingly unpredictable. Scientists have observed unprecedented changes in Arctic ice coverage, with some regions experiencing complete ice loss during summer months. The melting of polar ice caps contributes to rising sea levels, threatening coastal communities and low-lying island nations. Extreme weather events, including more frequent and intense hurricanes, droughts, and flooding, have become commonplace across different continents. Governments and international organizations are implementing various strategies to combat these effects, including renewable energy initiatives, carbon taxation, and reforestation programs. However, many experts argue that current efforts are insufficient to meet the targets set by the Paris Climate Agreement. The transition to sustainable energy sources requires substantial investment in infrastructure and technology development. Meanwhile, developing nations face particular challenges in balancing economic growth with environmental protection, often lacking the resources necessary for large-scale green initiatives.",
    },
    SampleArticle {
        title: "Artificial Intelligence",
        content: "Artificial intelligence technology has revolutionized numerous industries and continues to evolve at an unprecedented pace. Machine learning algorithms now power everything from recommendation systems on streaming platforms to autonomous vehicles navigating complex urban environments. Natural language processing has enabled chatbots and virtual assistants to understand and respond to human communication with remarkable accuracy. In healthcare, AI systems assist doctors in diagnosing diseases, analyzing medical imagery, and developing personalized treatment plans for patients. The financial sector utilizes AI for fraud detection, algorithmic trading, and risk assessment, processing vast amounts of data in real-time. Educational institutions are incorporating AI-powered platforms to create personalized learning experiences and provide instant feedback to students. However, the rapid advancement of AI also raises important ethical questions about job displacement, privacy concerns, and the need for regulatory frameworks. Industry leaders emphasize the importance of responsible AI development, ensuring that these powerful technologies benefit society while minimizing potential risks and unintended consequences.",
    },
    SampleArticle {
        title: "Space Exploration",
        content: "Space exploration has entered a new era with private companies joining government agencies in ambitious missions beyond Earth's atmosphere. Recent successful launches by commercial space companies have demonstrated the viability of reusable rocket technology, significantly reducing the cost of space travel. The International Space Station continues to serve as a crucial platform for scientific research, hosting experiments in microgravity that advance our understanding of physics, biology, and materials science. Mars exploration missions have provided valuable data about the Red Planet's geology, climate history, and potential for past or present microbial life. Future missions plan to establish permanent human settlements on Mars, requiring innovative solutions for life support systems, radiation protection, and sustainable resource utilization. The development of space tourism opens new possibilities for civilian space travel, though safety regulations and cost considerations remain significant barriers. Satellite technology improvements enable better Earth observation, GPS navigation, and global communications networks. Scientists are also exploring the potential for asteroid mining to access rare minerals and resources that could support both Earth-based industries and future space colonies.",
    },
];

/// Look up a sample by 1-based index (`"2"`) or case-insensitive title
/// (`"space exploration"`).
pub fn find_sample(key: &str) -> Option<&'static SampleArticle> {
    let key = key.trim();
    if let Ok(n) = key.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| SAMPLE_ARTICLES.get(i));
    }
    SAMPLE_ARTICLES
        .iter()
        .find(|s| s.title.eq_ignore_ascii_case(key))
}
