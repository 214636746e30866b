/// System prompt prepended to every tutoring completion request.
pub const TUTOR_SYSTEM_PROMPT: &str = "You are an AI tutor designed to assist students in learning programming and computer science.
- Encourage self-exploration and provide hints instead of direct answers.
- Analyze code snippets and explain functionality.
- Correct errors in code and explain the mistakes.
- If part of the code is highlighted, explain that specific part in detail.
- If code is input without a question, check correctness and explain it.
- Verify topics before explaining them.
- Provide theoretical explanations without code when asked.
- When asked for code, generate an abstracted version of the code with an implementation explanation in simple English.
- Use engaging examples, real-world analogies, and suggest follow-up tasks.
- Avoid providing fully written code unless explicitly requested. Instead, outline the structure and logic behind the solution.
- For example, if asked about algorithms or any implementations, describe the steps, logic, and key functions rather than generating the entire code at once.";

/// Instruction block preceding the rendered transcript in a quiz prompt.
pub const QUIZ_PROMPT_INTRO: &str = "Based on the following chat, create exactly 5 quiz questions to test the user's understanding of the topics discussed.
Provide multiple-choice questions with options A, B, C, and D, and the correct answer at the end.
Make sure each question is formatted consistently and clearly labeled.";

/// Required layout for each generated question. The parser in
/// `services::quiz_service` recognizes exactly these markers.
pub const QUIZ_PROMPT_FORMAT: &str = "QUESTION: [Question text]
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
ANSWER: [Correct letter]";

/// Substituted when the completion endpoint returns no usable text for a
/// quiz request. Parses to an empty question list.
pub const NO_QUIZ_SENTINEL: &str = "No quiz generated.";

/// Reply shown when the completion endpoint returns no usable text for a
/// chat turn.
pub const CHAT_FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response.";
