//! Fixed model instructions and interactive prompt texts.

pub const QUERY_INSTRUCTION: &str = "You are a helpful assistant that generates search queries based on user questions. Only generate one search query. The query should help find articles related to the user's query. If the user uses abbreviations, expand these to full phrases. If the user inputs something you don't understand, look for the articles closest to their search.";

pub const SUMMARY_INSTRUCTION: &str = "You are a helpful assistant that summarizes the content of a webpage. Summarize the user's input. Only output the summary.";

pub const CLEANUP_INSTRUCTION: &str = "You are a helpful assistant that makes sure that sentences make sense logically and grammatically based on user input. Make sure the sentence flows correctly and is grammatically correct. Wherever it says null, ignore these fields and continue.";

pub const TOPIC_PROMPT: &str = "Hello! Thanks for using Audicle. What kind of article do you want to read today?";

pub const LANGUAGE_PROMPT: &str = "Great! Is there a specific language you'd like to listen in? Please write out the full name of the language.";

pub const LANGUAGE_RETRY_PROMPT: &str = "Sorry, that language is not supported. Please select a language from this list: https://cloud.google.com/text-to-speech/docs/voices (or run audicle --list-languages)";

pub const LOADING_MESSAGE: &str = "Loading your article...";
