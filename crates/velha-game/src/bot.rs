//! The bot opponent: a generative language model picks the bot's
//! moves, with a random legal move as the unconditional fallback.
//!
//! The provider is best-effort by design. Whatever it returns, be it an
//! error, an out-of-range index, or an occupied cell, the game swallows
//! it, logs it, and plays a random open cell instead, so a bot game can
//! always continue without network access or an API key.

use std::time::Duration;

use rand::Rng;
use velha_model::{Board, Mark, Outcome};

use crate::{GameError, LocalGame};

/// Default wait before the bot plays, so its moves read as deliberate
/// rather than instantaneous.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(800);

const DEFAULT_MODEL: &str = "gemini-pro";

/// Picks a cell for the bot to play.
pub trait MoveProvider {
    /// Proposes a move on `board` for `bot`, playing against `player`.
    /// Implementations may return errors or illegal cells freely; the
    /// game validates and falls back.
    async fn pick_move(
        &self,
        board: &Board,
        bot: Mark,
        player: Mark,
    ) -> Result<usize, GameError>;
}

/// Configuration for [`LlmMoveProvider`].
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub api_key: String,
    pub model: String,
}

impl BotConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: DEFAULT_MODEL.to_string() }
    }

    /// Reads the configuration from the environment: `GEMINI_API_KEY`
    /// (required) and `VELHA_BOT_MODEL` (optional). Returns `None` when
    /// no key is set, in which case callers run on the fallback alone.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("VELHA_BOT_MODEL") {
            config.model = model;
        }
        Some(config)
    }
}

/// Asks a hosted generative model for the bot's move.
#[derive(Debug, Clone)]
pub struct LlmMoveProvider {
    http: reqwest::Client,
    config: BotConfig,
}

impl LlmMoveProvider {
    pub fn new(config: BotConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    /// Renders the board for the prompt: occupied cells show their
    /// mark, empty cells show their index, so the model can answer
    /// with an index directly.
    fn render_board(board: &Board) -> String {
        (0..velha_model::CELLS)
            .map(|i| match board.get(i) {
                Some(mark) => mark.to_string(),
                None => i.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn prompt(board: &Board, bot: Mark, player: Mark) -> String {
        format!(
            "You are playing Tic Tac Toe. The current board state is: [{}]\n\n\
             Your symbol is \"{bot}\" and the opponent's symbol is \"{player}\".\n\
             Empty cells are represented by their index number (0-8).\n\n\
             Return ONLY a single number (0-8) representing the best position to play. Choose strategically:\n\
             1. Win if possible\n\
             2. Block opponent from winning\n\
             3. Take center (4) if available\n\
             4. Take corners if available\n\
             5. Take sides as last resort\n\n\
             Return only the number, nothing else.",
            Self::render_board(board),
        )
    }
}

impl MoveProvider for LlmMoveProvider {
    async fn pick_move(
        &self,
        board: &Board,
        bot: Mark,
        player: Mark,
    ) -> Result<usize, GameError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, self.config.api_key,
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": Self::prompt(board, bot, player) }] }]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GameError::Provider(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GameError::Provider(format!("api error: {status}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GameError::Provider(format!("bad response body: {e}")))?;
        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                GameError::Provider("no text in response".to_string())
            })?;

        text.trim()
            .parse::<usize>()
            .map_err(|_| GameError::Provider(format!("not a cell index: {text:?}")))
    }
}

/// A uniformly random open cell, or `None` on a full board.
pub fn random_open_cell(board: &Board) -> Option<usize> {
    let open = board.open_cells();
    if open.is_empty() {
        return None;
    }
    let pick = rand::rng().random_range(0..open.len());
    Some(open[pick])
}

/// A game against the bot. The human plays X and always opens; the bot
/// plays O.
pub struct BotGame<P> {
    game: LocalGame,
    provider: P,
    thinking_delay: Duration,
}

impl<P: MoveProvider> BotGame<P> {
    pub fn new(provider: P) -> Self {
        Self { game: LocalGame::new(), provider, thinking_delay: DEFAULT_THINKING_DELAY }
    }

    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    pub const fn player_mark(&self) -> Mark {
        Mark::X
    }

    pub const fn bot_mark(&self) -> Mark {
        Mark::O
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.game.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.game.winning_line()
    }

    /// Returns `true` when the human may move.
    pub fn player_turn(&self) -> bool {
        !self.game.is_over() && self.game.current_player() == self.player_mark()
    }

    /// Plays the human's mark into `cell`.
    pub fn play_player(&mut self, cell: usize) -> Result<Option<Outcome>, GameError> {
        if !self.game.is_over() && self.game.current_player() != self.player_mark() {
            return Err(GameError::NotYourTurn);
        }
        self.game.play(cell)
    }

    /// Has the bot take its turn: wait out the thinking delay, ask the
    /// provider, validate its answer, and fall back to a random open
    /// cell on any failure. Returns the cell played and the outcome if
    /// the move ended the game.
    pub async fn play_bot(&mut self) -> Result<(usize, Option<Outcome>), GameError> {
        if self.game.is_over() {
            return Err(GameError::GameOver);
        }
        if self.game.current_player() != self.bot_mark() {
            return Err(GameError::NotYourTurn);
        }

        tokio::time::sleep(self.thinking_delay).await;

        let board = *self.game.board();
        let cell = match self
            .provider
            .pick_move(&board, self.bot_mark(), self.player_mark())
            .await
        {
            Ok(cell) if board.is_open(cell) => cell,
            Ok(cell) => {
                tracing::warn!(cell, "provider picked an illegal cell, falling back");
                random_open_cell(&board).ok_or(GameError::GameOver)?
            }
            Err(e) => {
                tracing::warn!(error = %e, "provider failed, falling back");
                random_open_cell(&board).ok_or(GameError::GameOver)?
            }
        };

        let outcome = self.game.play(cell)?;
        tracing::debug!(cell, "bot played");
        Ok((cell, outcome))
    }

    /// Starts over: empty board, the human to move.
    pub fn reset(&mut self) {
        self.game.reset();
    }
}
