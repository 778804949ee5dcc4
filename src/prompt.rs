//! Prompt templates for the content generator.
//!
//! Every intelligence feature in the pipeline (summarize, highlight, answer,
//! classify, synthesize) is the same templated-generation call with a
//! different instruction text. Templates are opaque strings with named
//! substitution slots; the wording is data, not logic, and is kept in one
//! place so it can be revised without touching the call sites.

/// Persona framing sent as the system message on every generation call.
pub const SYSTEM_PROMPT: &str = "\
You are an AI research assistant in public law, policy, and regulation. Your role is to help citizens understand government documents, \
provide summaries, answer questions, and analyze public comments. Always strive to be impartial, accurate, and respectful of \
diverse viewpoints. Your goal is to facilitate informed public participation in governance.";

const SUMMARY_PROMPT: &str = "\
Provide a 1000 character summary of the following document in natural layman's language.

{document_text}";

const HIGHLIGHTS_PROMPT: &str = "\
Create a bulleted list of key pros and cons from the document, highlight what is vague or unclear, what are the principles and some counter argument principles. MAX 2000 characters.

{document_text}";

const ANSWER_PROMPT: &str = "\
Based on the following document, answer the user's question in natural layman's language. Be impartial and respectful and not be overtly supportive of the document. Assume the user too has a valid argument and agree with them when they have a valid point. Remember that even if the user has expressed negatively to the document, your role is only to outline what the document says and its possible implications.

Document: {document_text}

User Question: {user_question}";

const SENTIMENT_PROMPT: &str = "\
Analyze the sentiment of the following user comment.
Categorize it as either Positive, Negative, or Neutral and only one of the three.

{user_comment}";

const COMMENT_SUMMARY_PROMPT: &str = "\
Summarize and categorize the user comments.
Identify 3-5 main categories of feedback and provide a brief summary for each:

{all_comments}";

pub fn summary(document_text: &str) -> String {
    SUMMARY_PROMPT.replace("{document_text}", document_text)
}

pub fn highlights(document_text: &str) -> String {
    HIGHLIGHTS_PROMPT.replace("{document_text}", document_text)
}

pub fn answer(document_text: &str, user_question: &str) -> String {
    ANSWER_PROMPT
        .replace("{document_text}", document_text)
        .replace("{user_question}", user_question)
}

pub fn sentiment(user_comment: &str) -> String {
    SENTIMENT_PROMPT.replace("{user_comment}", user_comment)
}

pub fn comment_summary(all_comments: &str) -> String {
    COMMENT_SUMMARY_PROMPT.replace("{all_comments}", all_comments)
}

/// Prefix of `s` holding at most `max_chars` characters, cut on a char
/// boundary. Used to bound prompt inputs to the configured budget.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_substitute_their_inputs() {
        assert!(summary("the bill text").contains("the bill text"));
        assert!(highlights("the bill text").contains("the bill text"));
        let a = answer("the bill text", "what changes?");
        assert!(a.contains("the bill text"));
        assert!(a.contains("what changes?"));
        assert!(sentiment("great idea").contains("great idea"));
        assert!(comment_summary("c1\nc2").contains("c1\nc2"));
    }

    #[test]
    fn truncate_shorter_input_is_unchanged() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
    }

    #[test]
    fn truncate_cuts_at_char_count() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
    }

    #[test]
    fn truncate_respects_multibyte_boundaries() {
        // Each char is 3 bytes in UTF-8; a byte-index cut would panic.
        let s = "维基百科全书";
        assert_eq!(truncate_chars(s, 2), "维基");
        assert_eq!(truncate_chars(s, 0), "");
    }
}
