//! tutor CLI: OCR an image, chat with the homework tutor, play a quiz. Config from env / .env.

use anyhow::Result;
use clap::Parser;
use llm_client::build_llm_client;
use ocr_client::{ExtractionResult, TextExtractor, VisionClient};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tutor::{
    generate_quiz, load_image, ChatSession, HomeworkFlow, QuizRound, SendOutcome, TutorConfig,
};
use tutor_cli::{capture_path, load_config, Cli, Commands};
use tutor_core::{init_tracing, ActiveSubject, FlowError, LearnerProfile};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config()?;
    init_tracing(config.log_file.as_deref())?;

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    match cli.command {
        Commands::Ocr { image } => handle_ocr(&config, &image).await,
        Commands::Chat {
            subject,
            subject_id,
            grade,
        } => {
            config.validate()?;
            let subject = ActiveSubject::new(subject_id, subject);
            let profile = grade
                .map(|grade_range| LearnerProfile { grade_range })
                .unwrap_or_else(|| config.learner_profile());
            handle_chat(&config, subject, profile, &mut input).await
        }
        Commands::Quiz {
            topic,
            subject,
            count,
        } => {
            config.validate()?;
            handle_quiz(&config, &topic, &subject, count, &mut input).await
        }
    }
}

fn vision_client(config: &TutorConfig) -> Result<Arc<dyn TextExtractor>> {
    config.validate_vision()?;
    Ok(Arc::new(VisionClient::with_endpoint(
        config.vision_api_key.clone(),
        config.vision_endpoint.clone(),
    )))
}

fn prompt_user(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

fn notice(err: &FlowError) {
    if !err.is_silent() {
        eprintln!("! {}", err);
    }
}

/// Handle the ocr command: capture → extraction, print the text or the notice.
async fn handle_ocr(config: &TutorConfig, path: &str) -> Result<()> {
    let extractor = vision_client(config)?;
    let image = match load_image(path).await {
        Ok(image) => image,
        Err(e) => {
            notice(&e);
            return Ok(());
        }
    };
    match extractor.extract(&image.bytes).await {
        ExtractionResult::Text(text) => println!("{}", text),
        ExtractionResult::NoText => notice(&FlowError::NoTextFound),
        ExtractionResult::Failed(message) => {
            notice(&FlowError::ExtractionFailed(message))
        }
    }
    Ok(())
}

/// Handle the chat command: line-oriented homework chat with optional image capture.
async fn handle_chat(
    config: &TutorConfig,
    subject: ActiveSubject,
    profile: LearnerProfile,
    input: &mut Input,
) -> Result<()> {
    let session = ChatSession::new(build_llm_client(&config.llm)).with_context(&profile, &subject);
    let mut flow = match vision_client(config) {
        Ok(extractor) => Some(HomeworkFlow::new(extractor, subject.clone())),
        Err(e) => {
            tracing::warn!(error = %e, "Image capture disabled");
            None
        }
    };

    println!(
        "Homework chat for {}. Type a question, /capture <image> to add homework, /quit to leave.",
        subject.subject_name
    );
    loop {
        let draft = session.draft();
        if draft.is_empty() {
            prompt_user("> ");
        } else {
            prompt_user(&format!("[draft: {}]\n(Enter to send, or type to replace) > ", draft));
        }
        let Some(line) = input.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line == "/quit" {
            break;
        }
        if let Some(path) = capture_path(line) {
            match flow.as_mut() {
                Some(flow) => review_capture(flow, &session, path, input).await?,
                None => eprintln!("! Image capture needs CLOUD_VISION_API_KEY"),
            }
            continue;
        }

        let result = if line.is_empty() {
            session.send_draft().await
        } else {
            session.send(line).await
        };
        match result {
            Ok(SendOutcome::Replied(message)) => println!("tutor: {}", message.content()),
            Ok(SendOutcome::Fallback { message, cause }) => {
                notice(&cause);
                println!("tutor: {}", message.content());
            }
            Ok(SendOutcome::Discarded) => {}
            Err(e) => notice(&e),
        }
    }
    session.reset();
    Ok(())
}

/// Runs one capture → review dialog; on confirm the text becomes the chat draft.
async fn review_capture(
    flow: &mut HomeworkFlow,
    session: &ChatSession,
    path: &str,
    input: &mut Input,
) -> Result<()> {
    match flow.capture(path).await {
        Ok(text) => println!("--- extracted text ---\n{}\n----------------------", text),
        Err(e) => {
            notice(&e);
            return Ok(());
        }
    }
    prompt_user("[y] confirm, [e] edit, anything else cancels > ");
    let answer = input.next_line().await?.unwrap_or_default();
    match answer.trim() {
        "y" | "Y" => {}
        "e" | "E" => {
            prompt_user("new text > ");
            let edited = input.next_line().await?.unwrap_or_default();
            flow.edit(edited);
        }
        _ => {
            flow.cancel();
            println!("Discarded.");
            return Ok(());
        }
    }
    if let Some(handoff) = flow.confirm() {
        session.prefill(handoff);
    }
    Ok(())
}

/// Handle the quiz command: generate, ask each question once, print the verdict.
async fn handle_quiz(
    config: &TutorConfig,
    topic: &str,
    subject: &str,
    count: usize,
    input: &mut Input,
) -> Result<()> {
    let llm = build_llm_client(&config.llm);
    println!("Generating quiz with AI...");
    let questions = match generate_quiz(llm.as_ref(), topic, subject, count).await {
        Ok(q) => q,
        Err(e) => {
            eprintln!("! Failed to generate quiz: {}", e);
            return Ok(());
        }
    };

    let mut round = QuizRound::new(questions);
    while let Some(question) = round.current().cloned() {
        let (n, total) = round.progress();
        println!("\nQuestion {} of {}: {}", n, total, question.question);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
        prompt_user("answer > ");
        let Some(line) = input.next_line().await? else {
            break;
        };
        let picked = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|i| question.options.get(i.wrapping_sub(1)))
            .cloned()
            .unwrap_or_else(|| line.trim().to_string());
        match round.answer(&picked) {
            Some(true) => println!("Correct!"),
            Some(false) => println!("Incorrect. The answer is {}.", question.correct_answer),
            None => {}
        }
        round.next();
    }

    let result = round.result();
    println!(
        "\n{} ({} of {} correct, max {} points)",
        result.verdict(),
        result.correct,
        result.total,
        result.max_score
    );
    Ok(())
}
