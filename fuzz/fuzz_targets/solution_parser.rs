#![no_main]

use libfuzzer_sys::fuzz_target;
use nuscan_solution::{Lexer, TokenKind, parse_solution};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // 렉서는 항상 EndOfInput으로 끝나야 함
        let mut lexer = Lexer::new(input);
        loop {
            if lexer.scan().kind == TokenKind::EndOfInput {
                break;
            }
        }
        assert_eq!(lexer.scan().kind, TokenKind::EndOfInput);

        // 경로 구분자는 플랫폼 구분자로 정규화되어야 함
        if let Ok(projects) = parse_solution(input) {
            if cfg!(not(windows)) {
                assert!(projects.iter().all(|p| !p.relative_path.contains('\\')));
            }
        }
    }
});
