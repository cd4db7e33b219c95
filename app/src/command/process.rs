use hotmem_config::Config;

/// Sample lines for simulated input, the shape a dictation feed produces.
const SAMPLE_LINES: &[&str] = &[
    "note this: buy almond milk and organic vegetables for dinner",
    "remember this: meeting with Sarah tomorrow at 3pm about the project proposal",
    "look into: latest React 18 features and concurrent rendering capabilities",
    "remind me to call the dentist next week for regular checkup",
    "The weather today is perfect for a walk in the park",
    "note this: great restaurant recommendation - Luigi's Italian on 5th street",
    "look into: investing in renewable energy stocks for portfolio diversification",
];

/// Input for the manual submission command.
pub struct ProcessInput {
    /// Transcript text; required unless `simulate` is set.
    pub text: Option<String>,
    /// Pick a built-in sample line instead.
    pub simulate: bool,
}

/// Strategy for one-off manual transcript processing.
#[derive(Debug, Clone, Copy)]
pub struct ProcessStrategy;

impl super::CommandStrategy for ProcessStrategy {
    type Input = ProcessInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let line = if input.simulate {
            sample_line().to_string()
        } else {
            input
                .text
                .ok_or_else(|| anyhow::anyhow!("Provide TEXT or pass --simulate"))?
        };

        // Blank input never reaches the engine.
        if line.trim().is_empty() {
            anyhow::bail!("Transcript text must not be blank");
        }

        let config = Config::load()?;
        let store = super::open_store(&config)?;
        let pipeline = super::build_pipeline(&config, &store);

        let report = pipeline.ingest_manual(&line).await?;

        println!("Processed: {line}");
        if report.matched_phrases.is_empty() {
            println!("No hot phrases matched.");
        } else {
            println!("Matched phrases: {}", report.matched_phrases.join(", "));
            println!("Memories created: {}", report.created());
        }

        Ok(())
    }
}

/// Rotate through the samples without dragging in an RNG dependency.
fn sample_line() -> &'static str {
    let millis = usize::try_from(chrono::Utc::now().timestamp_subsec_millis()).unwrap_or_default();
    SAMPLE_LINES[millis % SAMPLE_LINES.len()]
}
