// Prompt constants for the sales-fit analysis.

/// Substituted for `{page_text}` when extraction produced nothing.
pub const NO_PAGE_DATA_NOTE: &str =
    "No data could be scraped. Analyze based on the URL and general company knowledge if possible.";

/// Analysis prompt template.
/// Replace: {company_url}, then {page_text}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following information scraped from the company website ({company_url}) to assess their potential fit for Managed Extended Detection and Response (MXDR) cybersecurity services and generate sales enablement content.

**Scraped Data:**
---
{page_text}
---

**Analysis Task:**

Based *only* on the provided scraped data (or lack thereof) and the company URL:

1.  **MXDR Fit Assessment:**
    *   Estimate the company's likely size (Small, Medium, Large) and industry.
    *   Identify any indicators of their technology stack (e.g., Cloud-native, SaaS).
    *   Assess their potential need for advanced cybersecurity based on hints like compliance mentions, data sensitivity, lack of large internal security teams, or industry type.
    *   Conclude with a brief summary (1-2 sentences) on whether they seem like a Low, Medium, or High potential fit for MXDR, and *why*. Be conservative if data is sparse.

2.  **Personalized Cold Outreach Email Sequence:**
    *   Generate one initial cold outreach email (Subject + Body).
    *   Generate two distinct follow-up emails (Subject + Body).
    *   Emails should be concise, professional, reference a *potential* pain point suggested by the scraped data (or industry norms if no data), and introduce MXDR as a solution. Avoid definitive claims not supported by the data.

3.  **Sales Call Battlecard:**
    *   List 3-5 talking points relevant to the company/industry suggested by the data.
    *   List 3-5 probing questions to ask a cybersecurity decision-maker at this company.

**Output Format:**

Return the analysis as a JSON object with the following exact structure:
{
  "fitAssessment": "...",
  "coldOutreachEmails": ["Subject: ...\nBody: ..."],
  "followUpEmails": ["Subject: ...\nBody: ...", "Subject: ...\nBody: ..."],
  "battlecard": {
    "talkingPoints": ["...", "..."],
    "questions": ["...", "..."]
  }
}

If the scraped data is insufficient for a meaningful analysis, state that clearly in "fitAssessment" and provide generic (but plausible) emails and battlecard points based on common business needs, mentioning the lack of specific data. Do not invent information."#;

/// Fills the template. The page text goes in last so braces inside it are left alone.
pub fn build_analysis_prompt(page_text: &str, company_url: &str) -> String {
    let page_text = if page_text.trim().is_empty() {
        NO_PAGE_DATA_NOTE
    } else {
        page_text
    };
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{company_url}", company_url)
        .replace("{page_text}", page_text)
}
