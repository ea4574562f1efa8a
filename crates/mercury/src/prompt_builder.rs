//! Prompt Builder
//!
//! Deterministic construction of the exact messages sent to the model.
//! The instructions and few-shot examples are static; only the complaint
//! and the format instructions vary per request.

use crate::domain::{PromptSpec, TicketComplaint};

/// A worked complaint/record pair shown to the model
#[derive(Debug, Clone, Copy)]
pub struct FewShotExample {
    pub complaint: &'static str,
    /// Compact JSON of a fully valid triage record
    pub record: &'static str,
}

/// Canonical example, also used by tests as the stubbed model answer
pub const BILLING_EXAMPLE: FewShotExample = FewShotExample {
    complaint: "I was charged twice!",
    record: r#"{"category": "Billing_Dispute", "sentiment": "Frustrated", "urgency": "High", "suggested_action": "REFUND", "draft_response": "I apologize for the error. I have processed a refund."}"#,
};

pub const FEW_SHOT_EXAMPLES: [FewShotExample; 3] = [
    BILLING_EXAMPLE,
    FewShotExample {
        complaint: "My laptop screen went black two days after it arrived and it will not turn back on.",
        record: r#"{"category": "Hardware_Defect", "sentiment": "Disappointed", "urgency": "High", "suggested_action": "REPLACE", "draft_response": "I am sorry your new laptop failed so soon. I have arranged a replacement unit to be shipped to you right away."}"#,
    },
    FewShotExample {
        complaint: "The app logs me out every time I open the settings page. Kind of annoying.",
        record: r#"{"category": "Software_Bug", "sentiment": "Mildly annoyed", "urgency": "Medium", "suggested_action": "TROUBLESHOOT", "draft_response": "Thanks for letting us know. Could you tell us your app version and device model so we can reproduce the logout and get it fixed?"}"#,
    },
];

const ROLE_STATEMENT: &str = "You are a Senior Customer Support AI Agent.";

const INSTRUCTIONS: &str = r#"STRICT INSTRUCTIONS:
1. Analyze the ticket for root cause and emotion.
2. Categorize into: [Hardware_Defect, Software_Bug, Billing_Dispute, Shipping_Delay, User_Error].
3. Determine urgency: [Low, Medium, High, Critical].
4. Suggest action: [REFUND, REPLACE, TROUBLESHOOT, ESCALATE].
5. Output STRICTLY valid JSON: a single object, with no prose, markdown or code fences around it."#;

/// Fixed system block: role statement, numbered instructions, few-shot examples
pub fn system_prompt() -> String {
    let mut prompt = format!("{}\n\n{}\n\nFEW-SHOT EXAMPLES:\n", ROLE_STATEMENT, INSTRUCTIONS);
    for example in &FEW_SHOT_EXAMPLES {
        prompt.push_str(&format!(
            "User: \"{}\" -> {}\n",
            example.complaint, example.record
        ));
    }
    prompt
}

/// Build the prompt for one complaint.
///
/// The complaint is inserted verbatim; braces and quotes in it are not
/// escaped since the model reads it as natural text.
pub fn build(complaint: &TicketComplaint, format_instructions: &str) -> PromptSpec {
    let user = format!("{}\n\n{}", complaint.text(), format_instructions);
    PromptSpec::new(system_prompt(), user)
}
