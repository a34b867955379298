//! The terminal frontend: narration on stdout and answers to human prompts.
use std::io::{self, Write};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

use game_core::Event;
use runtime::ChoiceRequest;

use crate::config::CliConfig;
use crate::presentation::{Narrator, write_prompt};

/// Prints events as they are published and answers prompts from `input`.
///
/// The frontend never touches the engine. It consumes the runner's lossless
/// event feed and the human provider's prompt channel, and stops once both
/// are closed.
pub struct CliFrontend<W: Write> {
    config: CliConfig,
    narrator: Narrator,
    out: W,
}

impl CliFrontend<io::Stdout> {
    pub fn stdout(config: CliConfig) -> Self {
        Self::new(config, io::stdout())
    }
}

impl<W: Write> CliFrontend<W> {
    pub fn new(config: CliConfig, out: W) -> Self {
        let narrator = Narrator::new(&config);
        Self {
            config,
            narrator,
            out,
        }
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until the event stream and the prompt channel are both closed.
    ///
    /// Pending events are always printed before a prompt, so the user sees
    /// everything that happened up to their turn. End of input abandons the
    /// pending prompt, which cancels the encounter.
    pub async fn run<R>(
        &mut self,
        mut events: mpsc::Receiver<Event>,
        prompts: Option<mpsc::Receiver<ChoiceRequest>>,
        input: R,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut prompts = prompts;
        let mut events_open = true;
        let mut input_open = true;

        loop {
            tokio::select! {
                biased;

                received = events.recv(), if events_open => match received {
                    Some(event) => self.show(&event)?,
                    None => events_open = false,
                },
                request = next_prompt(&mut prompts), if prompts.is_some() => match request {
                    Some(request) if input_open => {
                        input_open = self.answer(request, &mut lines).await?;
                    }
                    // Dropping the request cancels it.
                    Some(_) => {}
                    None => prompts = None,
                },
                else => break,
            }
        }

        self.out.flush()?;
        Ok(())
    }

    fn show(&mut self, event: &Event) -> io::Result<()> {
        if let Some(line) = self.narrator.render(event) {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    /// Returns false once input has ended.
    async fn answer<R>(&mut self, request: ChoiceRequest, lines: &mut Lines<R>) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
    {
        write_prompt(
            &mut self.out,
            &self.narrator,
            &request,
            self.config.show_status,
        )?;

        match lines.next_line().await? {
            Some(line) => {
                if request.reply.send(line).is_err() {
                    tracing::debug!(target: "cli::frontend", "prompt withdrawn before reply");
                }
                Ok(true)
            }
            None => {
                writeln!(self.out)?;
                tracing::info!(
                    target: "cli::frontend",
                    actor = %request.actor,
                    "input closed; abandoning the encounter"
                );
                Ok(false)
            }
        }
    }
}

async fn next_prompt(
    prompts: &mut Option<mpsc::Receiver<ChoiceRequest>>,
) -> Option<ChoiceRequest> {
    match prompts {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
