use std::path::Path;

use anyhow::{Context, Result};
use course_search::models::{CourseOption, Phase};
use course_search::utils::logging;
use course_search::{Config, SearchOrchestrator, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

const CONFIG_FILE: &str = "search.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = load_config()?;

    // 初始化日志
    logging::init(&config);
    logging::log_startup(&config);

    let orchestrator = SearchOrchestrator::from_config(&config)?;
    let options = orchestrator.catalog().options();
    print_options(&options);

    // 状态变化时刷新输出
    let mut receiver = orchestrator.subscribe();
    tokio::spawn(async move {
        let mut printed = (0, Phase::Idle);
        while receiver.changed().await.is_ok() {
            let state = receiver.borrow_and_update().clone();
            if (state.active_seq, state.phase) == printed {
                continue;
            }
            match state.phase {
                Phase::Loading => println!("Processing..."),
                Phase::Settled => println!("\nAnswer:\n{}\n", state.display_text),
                Phase::Idle => {}
            }
            printed = (state.active_seq, state.phase);
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("课程 (编号或课程标识，回车跳过，exit 退出):");
        let Some(course) = lines.next_line().await? else {
            break;
        };
        if course.trim() == "exit" {
            break;
        }
        orchestrator.set_course_identifier(resolve_course(&options, course.trim()));

        println!("问题:");
        let Some(query) = lines.next_line().await? else {
            break;
        };
        orchestrator.set_query_text(query);

        if let SubmitOutcome::Rejected { message } = orchestrator.submit_current().await {
            println!("{}", message);
        }
    }

    Ok(())
}

/// 优先读取当前目录的配置文件，否则使用环境变量
fn load_config() -> Result<Config> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        Config::from_toml_file(path)
            .with_context(|| format!("无法加载配置文件: {}", CONFIG_FILE))
    } else {
        let config = Config::from_env();
        config.validate().context("环境变量配置不合法")?;
        Ok(config)
    }
}

fn print_options(options: &[CourseOption]) {
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i, option.label);
    }
}

/// 数字按下拉框编号选择，其它输入原样作为课程标识
fn resolve_course(options: &[CourseOption], input: &str) -> String {
    input
        .parse::<usize>()
        .ok()
        .and_then(|i| options.get(i))
        .map(|option| option.identifier.clone())
        .unwrap_or_else(|| input.to_string())
}
