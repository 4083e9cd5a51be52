//! Static prompt set for the treasurer game.

use crate::model::game::{PointTiers, Prompt, PromptSet, Verdict};

/// Receipt image path relative to the events directory.
macro_rules! receipt {
    ($file:literal) => {
        Some(concat!("TTIRASWRTAC/receipts/", $file))
    };
}

const PROMPTS: &[Prompt] = &[
    Prompt {
        message: "I bought paper plates and cups for the club's Christmas party. Receipt is attached below.",
        answer: Verdict::Accepted,
        image_path: receipt!("1.jpg"),
    },
    Prompt {
        message: "I'm claiming RM66.24 for a meal I had while brainstorming club ideas alone.",
        answer: Verdict::Rejected,
        image_path: receipt!("2.jpg"),
    },
    Prompt {
        message: "I want to be reimbursed RM38.16 for poster and card printing. The budget was approved last month.",
        answer: Verdict::Accepted,
        image_path: receipt!("3.jpg"),
    },
    Prompt {
        message: "Bought a RM150 office chair. No receipt, but it was used once for a club event.",
        answer: Verdict::Rejected,
        image_path: receipt!("4.jpg"),
    },
    Prompt {
        message: "I would like to request reimbursement for RM20 for birthday decorations for a member.",
        answer: Verdict::Rejected,
        image_path: receipt!("5.png"),
    },
    Prompt {
        message: "Claiming RM50 for batteries and extension cords used during Clubs and Societies Fiesta.",
        answer: Verdict::Accepted,
        image_path: receipt!("6.jpg"),
    },
    Prompt {
        message: "I lost the receipt but I bought snacks for the meeting yesterday. Can I still claim it?",
        answer: Verdict::NeedsRevision,
        image_path: None,
    },
    Prompt {
        message: "I got a RM10 notebook for personal use at club meetings, can I claim it?",
        answer: Verdict::Rejected,
        image_path: receipt!("8.jpg"),
    },
    Prompt {
        message: "Reimbursement request: RM40 for our event's performer's travel expenses.",
        answer: Verdict::Accepted,
        image_path: receipt!("9.jpg"),
    },
    Prompt {
        message: "Here's a claim for RM80 on a gaming mouse I wanted to try during meetings.",
        answer: Verdict::Rejected,
        image_path: receipt!("10.jpg"),
    },
    Prompt {
        message: "I've got a claim of RM27 for flyers. Receipt is missing, but it's from our regular printer.",
        answer: Verdict::NeedsRevision,
        image_path: None,
    },
    Prompt {
        message: "Claiming RM46 for coffee and drinks I bought for the event. Invoice attached.",
        answer: Verdict::Accepted,
        image_path: receipt!("12.jpg"),
    },
    Prompt {
        message: "I'm submitting a claim for RM20. It's for a t-shirt I got at another club's event.",
        answer: Verdict::Rejected,
        image_path: receipt!("13.jpg"),
    },
    Prompt {
        message: "I'd like to claim RM10 for change that I paid to a member looking to sign up but had no small notes. I have picture proof of the payment.",
        answer: Verdict::Accepted,
        image_path: receipt!("14.jpg"),
    },
    Prompt {
        message: "Requesting RM30 reimbursement for an e-hailing ride to attend our meeting. No prior approval.",
        answer: Verdict::NeedsRevision,
        image_path: receipt!("15.jpg"),
    },
    Prompt {
        message: "I bought decorations for the bake sale that our club is participating in. The total was RM35.",
        answer: Verdict::Accepted,
        image_path: receipt!("16.jpg"),
    },
    Prompt {
        message: "Claiming RM22 for a book I think is useful for our club's mission. No receipt.",
        answer: Verdict::NeedsRevision,
        image_path: None,
    },
    Prompt {
        message: "I'm claiming RM35 for event refreshments, can I use this receipt with the same amount but a different item?",
        answer: Verdict::NeedsRevision,
        image_path: receipt!("18.jpg"),
    },
    Prompt {
        message: "Requesting RM100 for an external speaker's fee. Signed and approved invoice attached.",
        answer: Verdict::Accepted,
        image_path: receipt!("19.jpg"),
    },
    Prompt {
        message: "I have a receipt from buying prizes for an event 1 year ago, can I claim it now?",
        answer: Verdict::Rejected,
        image_path: receipt!("20.jpg"),
    },
];

/// The reimbursement claim prompts, scored in bands of five.
pub fn treasurer_prompts() -> PromptSet {
    PromptSet {
        prompts: PROMPTS.to_vec(),
        tiers: PointTiers::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_twenty_prompts() {
        assert_eq!(treasurer_prompts().len(), 20);
    }

    #[test]
    fn images_live_in_receipts_dir() {
        let set = treasurer_prompts();
        let without_image: Vec<usize> = set
            .prompts
            .iter()
            .enumerate()
            .filter(|(_, p)| p.image_path.is_none())
            .map(|(i, _)| i)
            .collect();

        assert_eq!(without_image, vec![6, 10, 16]);
        assert!(set
            .prompts
            .iter()
            .filter_map(|p| p.image_path)
            .all(|path| path.starts_with("TTIRASWRTAC/receipts/")));
    }

    #[test]
    fn every_verdict_is_used() {
        let set = treasurer_prompts();
        for verdict in Verdict::ALL {
            assert!(set.prompts.iter().any(|p| p.answer == verdict));
        }
    }
}
