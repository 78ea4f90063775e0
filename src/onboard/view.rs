use crate::config::Config;
use console::style;

pub fn print_welcome_banner() {
    println!();
    println!("  {}", style("SEO Blog Generator Setup").cyan().bold());
    println!(
        "  {}",
        style("A few questions about your business, then you're ready to publish.").dim()
    );
    println!();
}

pub fn print_step(current: u8, total: u8, title: &str) {
    println!();
    println!(
        "  {} {}",
        style(format!("[{current}/{total}]")).cyan().bold(),
        style(title).white().bold()
    );
    println!("  {}", style("─".repeat(50)).dim());
}

pub fn print_bullet(text: &str) {
    println!("  {} {}", style("›").cyan(), text);
}

pub fn print_summary(config: &Config, topic_count: usize, api_key_saved: bool) {
    println!();
    println!(
        "  {}",
        style("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━").cyan()
    );
    println!("  ◆  {}", style("Setup complete").white().bold());
    println!(
        "  {}",
        style("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━").cyan()
    );
    println!();

    println!("  {}", style("Config saved to").dim());
    println!("    {}", style(config.config_path.display()).green());
    println!();

    print_bullet(&format!(
        "Business: {} ({}, {})",
        config.business.name, config.business.kind, config.business.location
    ));
    print_bullet(&format!("Model: {}", config.ai.model));
    print_bullet(&format!(
        "Images: {}",
        if config.ai.generate_images { "on" } else { "off" }
    ));
    print_bullet(&format!("Posts: {}", config.posts_dir().display()));
    print_bullet(&format!("Topics generated: {topic_count}"));
    print_bullet(&format!("Schedule: {}", config.schedule.cron));

    println!();
    println!("  {}", style("Next steps").white().bold());
    println!();

    let mut step = 1u8;
    if !api_key_saved {
        println!(
            "    {} Set your API key",
            style(format!("{step}.")).cyan().bold()
        );
        println!("       {}", style("export OPENAI_API_KEY=\"sk-...\"").yellow());
        println!();
        step += 1;
    }

    println!(
        "    {} Run a test generation",
        style(format!("{step}.")).cyan().bold()
    );
    println!("       {}", style("blog-generator generate").yellow());
    println!();
    step += 1;

    if !config.schedule.is_manual() {
        println!(
            "    {} Start the scheduler",
            style(format!("{step}.")).cyan().bold()
        );
        println!("       {}", style("blog-generator schedule").yellow());
        println!();
    }
}
