use crate::domain::tts::VoiceSettings;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

/// Sentence-ending punctuation followed by whitespace
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("sentence pattern is valid"));

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Translate, AWS Polly, etc.)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
/// - Provider-specific voice and rate selection
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech with the given voice settings
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, voice: VoiceSettings) -> Result<Vec<u8>, String>;
}

/// Split text into batches of at most `max_chars` characters.
///
/// Whole sentences are packed together where they fit. A sentence longer
/// than the limit is split between words, and a word longer than the limit
/// is cut into fixed-size pieces. Whitespace-only input yields no batches.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    split_into_batches_by(text, max_chars, |piece| piece.chars().count())
}

/// Split text into batches whose `measure` stays within `max_len`.
///
/// `measure` must be additive over concatenation, as a plain character count
/// or the length of an escaped rendering is. Packing follows
/// [`split_into_batches`].
pub fn split_into_batches_by(
    text: &str,
    max_len: usize,
    measure: impl Fn(&str) -> usize,
) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if measure(text) <= max_len {
        return vec![text.to_string()];
    }

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for mat in SENTENCE_END.find_iter(text) {
        sentences.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    let mut packer = BatchPacker::new(max_len, &measure);

    for sentence in sentences {
        let sentence = sentence.trim();
        if measure(sentence) <= max_len {
            packer.push(sentence);
            continue;
        }

        for word in sentence.split_whitespace() {
            if measure(word) <= max_len {
                packer.push(word);
            } else {
                for chunk in chunk_word(word, max_len, &measure) {
                    packer.push(&chunk);
                }
            }
        }
    }

    packer.finish()
}

/// Cut a word into pieces whose measure stays within `max_len`
fn chunk_word(word: &str, max_len: usize, measure: &impl Fn(&str) -> usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0;
    let mut buf = [0u8; 4];

    for c in word.chars() {
        let c_len = measure(c.encode_utf8(&mut buf));
        if !chunk.is_empty() && chunk_len + c_len > max_len {
            chunks.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }
        chunk.push(c);
        chunk_len += c_len;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }

    chunks
}

/// Greedy packer that starts a new batch when the next piece would overflow
struct BatchPacker<'a, F: Fn(&str) -> usize> {
    max_len: usize,
    measure: &'a F,
    batches: Vec<String>,
    current: String,
    current_len: usize,
}

impl<'a, F: Fn(&str) -> usize> BatchPacker<'a, F> {
    fn new(max_len: usize, measure: &'a F) -> Self {
        Self {
            max_len,
            measure,
            batches: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }
        let piece_len = (self.measure)(piece);
        if self.current.is_empty() {
            self.current.push_str(piece);
            self.current_len = piece_len;
            return;
        }

        let separator_len = (self.measure)(" ");
        if self.current_len + separator_len + piece_len > self.max_len {
            self.batches.push(std::mem::take(&mut self.current));
            self.current.push_str(piece);
            self.current_len = piece_len;
        } else {
            self.current.push(' ');
            self.current.push_str(piece);
            self.current_len += separator_len + piece_len;
        }
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.batches.push(self.current);
        }
        self.batches
    }
}
