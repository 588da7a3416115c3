//! Prompt construction and response extraction.

/// System prompt sent ahead of every analysis request.
pub const SYSTEM_PROMPT: &str = "\
You are a legal document analyst writing for readers who are not lawyers.

Respond ONLY with a JSON object. No markdown fences, no explanation, just raw JSON.";

const DOCUMENT_OPEN: &str = "<document>";
const DOCUMENT_CLOSE: &str = "</document>";

/// Build the single combined prompt covering classification, clause
/// extraction, risk scoring and summarisation.
pub fn build_prompt(document_text: &str) -> String {
    format!(
        "Analyse the document between the {DOCUMENT_OPEN} tags.\n\
         \n\
         1. Classify it as one of: \"Terms of Service\", \"Privacy Policy\", \
         \"Employment Contract\", \"Software License\", \"Unknown\".\n\
         2. Extract the important clauses and sort them into obligations the reader \
         takes on, rights and data-usage terms, and red flags.\n\
         3. Quote each clause in at most 200 characters and explain it in one plain sentence.\n\
         4. Severity is one of \"Low\", \"Medium\", \"High\", \"Critical\". \
         Red flags are always \"High\" or \"Critical\".\n\
         5. Give an overall riskLevel of \"Low\", \"Medium\" or \"High\", a sentiment of \
         \"Positive\", \"Neutral\" or \"Negative\", and three to five keyPoints.\n\
         \n\
         Return exactly this JSON structure:\n\
         {{\n\
           \"summary\": {{\"documentType\": \"...\", \"sentiment\": \"...\", \"keyPoints\": [\"...\"], \"riskLevel\": \"...\"}},\n\
           \"obligations\": [{{\"category\": \"...\", \"clause\": \"...\", \"explanation\": \"...\", \"severity\": \"...\", \"impact\": \"...\"}}],\n\
           \"rights_and_data_usage\": [{{\"category\": \"...\", \"clause\": \"...\", \"explanation\": \"...\", \"severity\": \"...\", \"userProtection\": \"...\"}}],\n\
           \"red_flags\": [{{\"category\": \"...\", \"clause\": \"...\", \"explanation\": \"...\", \"severity\": \"...\", \"recommendation\": \"...\", \"legalImplications\": \"...\"}}]\n\
         }}\n\
         \n\
         {DOCUMENT_OPEN}\n\
         {document_text}\n\
         {DOCUMENT_CLOSE}"
    )
}

/// The document text embedded in a prompt built by [`build_prompt`].
pub fn document_section(prompt: &str) -> Option<&str> {
    let start = prompt.rfind(DOCUMENT_OPEN)? + DOCUMENT_OPEN.len();
    let end = prompt.rfind(DOCUMENT_CLOSE)?;
    (start <= end).then(|| prompt[start..end].trim())
}

/// The outermost `{ ... }` span of a completion, tolerating prose or code
/// fences around it.
pub fn extract_json_object(completion: &str) -> Option<&str> {
    let start = completion.find('{')?;
    let end = completion.rfind('}')?;
    (start < end).then(|| &completion[start..=end])
}
