//! Interactive chat loop. One turn at a time: the next line is only read
//! after the previous reply has been rendered.

use std::io::Write;

use authguide_engine::Session;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::display;

pub async fn run(session: &mut Session) -> anyhow::Result<()> {
    println!("질문을 입력하세요. (예: \"견적 메뉴 보여줘\", 종료: exit)");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit" | "종료") {
            break;
        }

        let reply = session.handle_search(input).await;
        display::print_reply(&reply);
    }

    Ok(())
}
