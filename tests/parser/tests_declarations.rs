#![allow(clippy::unwrap_used, clippy::expect_used)]

use rstest::rstest;
use tcdoc::parser::{
    access_modifier, comment_texts, documentation_for, extends, implements, is_abstract,
    strip_comments, var_blocks,
};

const PROVIDE_PML_COMMAND: &str = "FUNCTION_BLOCK FB_ProvidePmlCommand EXTENDS FB_Provide
(*details Functionblock to provide PmlCommands.
The counterpart of this FB is the [FB_PullPmlCommand][LCA_NGP_Core.FB_PullPmlCommand].*)

VAR
\t_stPmlCommand : ST_PmlCommand; (* current command *)
\t_sUrl : STRING := 'http://plc//commands';
END_VAR
VAR_OUTPUT
\tbBusy : BOOL;
END_VAR
";

#[test]
fn test_realistic_function_block() {
    assert_eq!(extends(PROVIDE_PML_COMMAND), vec!["FB_Provide"]);
    assert!(implements(PROVIDE_PML_COMMAND).is_empty());
    assert_eq!(access_modifier(PROVIDE_PML_COMMAND), None);
    assert!(!is_abstract(PROVIDE_PML_COMMAND));

    let blocks = var_blocks(PROVIDE_PML_COMMAND);
    let kinds: Vec<_> = blocks.iter().map(|b| b.kind.as_str()).collect();
    assert_eq!(kinds, vec!["VAR", "VAR_OUTPUT"]);
    assert!(blocks[0].body.contains("(* current command *)"));
    assert!(blocks[0].body.contains("'http://plc//commands'"));

    let doc = documentation_for(PROVIDE_PML_COMMAND).unwrap();
    assert!(
        doc.details
            .as_deref()
            .unwrap()
            .starts_with("Functionblock to provide PmlCommands.\nThe counterpart")
    );
}

#[test]
fn test_string_contents_are_not_comments() {
    let texts = comment_texts(PROVIDE_PML_COMMAND);
    assert_eq!(texts.len(), 2);
    assert!(strip_comments(PROVIDE_PML_COMMAND).contains("'http://plc//commands'"));
}

#[rstest]
#[case("FUNCTION_BLOCK FB_A EXTENDS FB_B")]
#[case("FUNCTION_BLOCK FB_A ABSTRACT PUBLIC EXTENDS FB_B, FB_C IMPLEMENTS I_D")]
#[case("METHOD PRIVATE M : BOOL\nVAR_INPUT\n\ta : INT;\nEND_VAR")]
#[case("(* unterminated EXTENDS FB_X")]
fn test_extraction_is_idempotent(#[case] decl: &str) {
    assert_eq!(extends(decl), extends(decl));
    assert_eq!(implements(decl), implements(decl));
    assert_eq!(access_modifier(decl), access_modifier(decl));
    assert_eq!(var_blocks(decl), var_blocks(decl));
}

#[test]
fn test_unterminated_comment_hides_rest() {
    let decl = "FUNCTION_BLOCK FB_A (* oops\nEXTENDS FB_B\nVAR\n\tx : INT;\nEND_VAR";
    assert!(extends(decl).is_empty());
    assert!(var_blocks(decl).is_empty());
    assert_eq!(strip_comments(decl).len(), decl.len());
}
