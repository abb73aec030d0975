//! Frequently asked questions served by `GET /api/faqs`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }
}

/// The published FAQ, in display order
pub fn default_faqs() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "Which plan should I choose?",
            "It depends on your server type and player count. Use our Plan Calculator to get a personalized recommendation. For vanilla servers with under 20 players, our Budget Iron plan works great. For modded servers or larger communities, consider Performance plans.",
        ),
        FaqEntry::new(
            "Do you support modded Minecraft?",
            "Yes! We fully support Forge, Fabric, and all popular modpacks. Our Performance plans are optimized for modded servers with DDR5 memory and AMD EPYC processors for maximum TPS.",
        ),
        FaqEntry::new(
            "What happens if I exceed player limits?",
            "Your server will continue running but may experience reduced TPS (ticks per second). We recommend upgrading your plan before hitting capacity. You can upgrade instantly from the Pterodactyl panel with zero downtime.",
        ),
        FaqEntry::new(
            "Is DDoS protection included?",
            "Yes, all plans include advanced DDoS protection at no extra cost. We provide Layer 3/4 and Layer 7 protection with automatic attack detection and zero-downtime mitigation.",
        ),
        FaqEntry::new(
            "How fast is setup?",
            "Instant! Your server is provisioned automatically within seconds of payment. You'll receive Pterodactyl panel access immediately and can start configuring your server right away.",
        ),
        FaqEntry::new(
            "Do you provide refunds?",
            "Yes, we offer refunds within 48 hours of purchase if the service does not meet the advertised specifications. Please review our Refund Policy page for full details on eligibility and the request process.",
        ),
        FaqEntry::new(
            "Can I change my server version?",
            "Absolutely! Through the Pterodactyl panel, you can switch between Paper, Spigot, Forge, Fabric, and other server software with just a few clicks.",
        ),
        FaqEntry::new(
            "What panel do you use?",
            "We use Pterodactyl Panel, an open-source game server management panel. It provides a clean web interface for file management, console access, plugin installation, backups, and more.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faq_order_stable() {
        let faqs = default_faqs();
        assert_eq!(faqs.len(), 8);
        assert_eq!(faqs[0].question, "Which plan should I choose?");
        assert_eq!(faqs[7].question, "What panel do you use?");
    }

    #[test]
    fn test_no_empty_entries() {
        assert!(default_faqs()
            .iter()
            .all(|f| !f.question.is_empty() && !f.answer.is_empty()));
    }
}
