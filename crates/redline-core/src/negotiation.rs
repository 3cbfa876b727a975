//! Negotiation-simulator replies and conversation summaries, plus the
//! canned chat fallback used when the chat backend is unreachable.
//!
//! Everything here is pure and deterministic; pacing, speech capture,
//! and playback belong to the browser.

use crate::types::NegotiationStyle;

/// Canned review answers keyed on topics in the user's message.
/// Scanned in order; first hit wins.
const TOPIC_REPLIES: &[(&str, &str)] = &[
    (
        "confidentiality",
        "The confidentiality clause typically covers proprietary information and requires \
         the recipient to protect it from unauthorized disclosure. You should ensure it \
         includes specific duration and defines what qualifies as confidential information.",
    ),
    (
        "termination",
        "The termination clause allows either party to exit with 30 days notice. This is \
         quite permissive and you may want to negotiate for specific termination fees or \
         wind-down periods to protect your interests.",
    ),
    (
        "liability",
        "The liability limitation caps damages to prevent excessive exposure. However, \
         ensure this aligns with your insurance and won't prevent recovery for gross \
         negligence or willful misconduct.",
    ),
    (
        "payment",
        "Payment is due 30 days from invoice. Consider adding late payment penalties and \
         establishing a dispute resolution process for contested invoices.",
    ),
    (
        "intellectual property",
        "Intellectual property ownership is transferred to the Client. Clarify if this \
         includes pre-existing IP and modifications, and consider retaining rights to \
         general methodologies.",
    ),
];

const DEFAULT_REPLY: &str =
    "This is a good question. Based on the contract analysis, I recommend reviewing all \
     high-priority clauses and discussing these modifications with the other party before \
     signing.";

/// Degraded chat reply for when the chat backend is down. Keyword
/// table, first match wins, deterministic.
pub fn fallback_chat_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    TOPIC_REPLIES
        .iter()
        .find(|(topic, _)| lower.contains(topic))
        .map_or(DEFAULT_REPLY, |(_, reply)| *reply)
}

/// Style-dependent counterpart line for the negotiation simulator.
/// Only the aggressive persona quotes the user's stated context back.
pub fn counterpart_reply(style: NegotiationStyle, context: &str) -> String {
    match style {
        NegotiationStyle::Aggressive => format!(
            "I strongly disagree with that point. We need better terms here. Based on what \
             you mentioned - \"{context}\" - we can't accept those conditions. What specific \
             improvements can you offer?"
        ),
        NegotiationStyle::MildlyAggressive => "That's a reasonable point, but I think we need \
             to address some concerns. Given what you've shared about your situation, let's \
             look for middle ground. How about we adjust this section?"
            .into(),
        NegotiationStyle::Friendly => "I appreciate that perspective. I understand the context \
             you mentioned. Let's work together to find a solution that works for both of us. \
             What would be most important to you?"
            .into(),
    }
}

/// Key-points summary for a finished negotiation conversation.
/// The context is clipped to its first 100 characters (char-boundary
/// safe); the transcript is accepted for interface stability but the
/// summary template does not quote it.
pub fn conversation_highlights(_conversation: &str, context: &str) -> String {
    let clipped: String = context.chars().take(100).collect();
    format!(
        "KEY NEGOTIATION POINTS:\n\n\
         • Critical Terms: Payment conditions, liability caps, and termination clauses require careful review\n\
         • Leverage Points: Recognized context - {clipped}... should be leveraged strategically\n\
         • Risk Factors: Ensure all counter-proposals address the main concerns raised during negotiation\n\
         • Next Steps: Document all agreed terms and prepare formal amendments before signing\n\
         • Follow-up Actions: Schedule confirmation call to review final terms and clarify any ambiguities"
    )
}
