use crate::error::{ProtoError, ProtoResult};
use modscope_plugin::{FieldDecl, FieldLabel, MessageDecl, RpcDecl, SchemaFile, ServiceDecl};
use pest::Parser;
use pest::iterators::Pair;

#[derive(pest_derive::Parser)]
#[grammar = "proto.pest"]
pub struct ProtoParser;

/// Parses a schema source into its structural facts. Option values and enum
/// bodies are checked for shape but only their names are kept.
pub fn parse_schema(source: &str) -> ProtoResult<SchemaFile> {
    let root = ProtoParser::parse(Rule::file, source)?
        .next()
        .ok_or_else(|| ProtoError::syntax(1, 1, "empty parse tree"))?;

    let mut builder = SchemaBuilder::default();
    for item in root.into_inner() {
        builder.top_level(item)?;
    }
    Ok(builder.file)
}

/// Human-readable names for the rules that show up in syntax errors.
pub(crate) fn describe_rule(rule: &Rule) -> String {
    let name = match rule {
        Rule::ident => "identifier",
        Rule::full_ident => "qualified name",
        Rule::type_ref => "type name",
        Rule::open_brace => "'{'",
        Rule::close_brace => "'}'",
        Rule::assign => "'='",
        Rule::semi => "';'",
        Rule::field_number => "field number",
        Rule::string | Rule::str_lit => "string literal",
        Rule::EOI => "end of file",
        other => return format!("{other:?}").replace('_', " "),
    };
    name.to_string()
}

#[derive(Default)]
struct SchemaBuilder {
    file: SchemaFile,
}

impl SchemaBuilder {
    fn top_level(&mut self, item: Pair<'_, Rule>) -> ProtoResult<()> {
        match item.as_rule() {
            Rule::syntax_stmt => self.file.syntax = Some(string_child(&item)),
            Rule::package_stmt => self.file.package = Some(child_text(&item, Rule::full_ident)),
            Rule::import_stmt => self.file.imports.push(string_child(&item)),
            Rule::option_stmt => self.file.options.push(option(&item)),
            Rule::message_def => self.message(item, None)?,
            Rule::enum_def => self.file.enums.push(child_text(&item, Rule::ident)),
            Rule::service_def => self.file.services.push(service(item)),
            Rule::extend_def => self.extend(item, None)?,
            _ => {}
        }
        Ok(())
    }

    fn message(&mut self, def: Pair<'_, Rule>, scope: Option<&str>) -> ProtoResult<()> {
        let (name, line) = match child(&def, Rule::ident) {
            Some(ident) => (qualify(scope, ident.as_str()), ident.line_col().0),
            None => return Ok(()),
        };
        match child(&def, Rule::message_body) {
            Some(body) => self.message_body(name, line, body),
            None => Ok(()),
        }
    }

    /// Records the message before its nested declarations so the outer
    /// message precedes them in declaration order.
    fn message_body(&mut self, name: String, line: usize, body: Pair<'_, Rule>) -> ProtoResult<()> {
        let slot = self.file.messages.len();
        self.file.messages.push(MessageDecl {
            name: name.clone(),
            fields: Vec::new(),
            line,
        });

        let mut fields = Vec::new();
        for item in body.into_inner() {
            match item.as_rule() {
                Rule::message_def => self.message(item, Some(name.as_str()))?,
                Rule::enum_def => {
                    let enum_name = qualify(Some(name.as_str()), &child_text(&item, Rule::ident));
                    self.file.enums.push(enum_name);
                }
                Rule::extend_def => self.extend(item, Some(name.as_str()))?,
                Rule::oneof_def => {
                    let oneof = child_text(&item, Rule::ident);
                    for member in item.into_inner() {
                        match member.as_rule() {
                            Rule::field => fields.push(field(&member, Some(oneof.as_str()))?),
                            Rule::group => fields.push(self.group(member, &name, Some(oneof.as_str()))?),
                            _ => {}
                        }
                    }
                }
                Rule::group => fields.push(self.group(item, &name, None)?),
                Rule::field => fields.push(field(&item, None)?),
                _ => {}
            }
        }

        self.file.messages[slot].fields = fields;
        Ok(())
    }

    /// A proto2 group declares a nested message and a field of that type
    /// named after it in lower case.
    fn group(&mut self, group: Pair<'_, Rule>, scope: &str, oneof: Option<&str>) -> ProtoResult<FieldDecl> {
        let ident = child(&group, Rule::ident);
        let type_name = ident.as_ref().map(|p| p.as_str().to_string()).unwrap_or_default();
        let line = ident.map(|p| p.line_col().0).unwrap_or_else(|| group.line_col().0);
        let decl = FieldDecl {
            name: type_name.to_lowercase(),
            type_name: type_name.clone(),
            number: field_number(&group)?,
            label: label(&group),
            oneof: oneof.map(str::to_string),
        };
        if let Some(body) = child(&group, Rule::message_body) {
            self.message_body(qualify(Some(scope), &type_name), line, body)?;
        }
        Ok(decl)
    }

    /// Extension fields belong to another message; only nested group
    /// messages are recorded, and field numbers are still validated.
    fn extend(&mut self, def: Pair<'_, Rule>, scope: Option<&str>) -> ProtoResult<()> {
        for item in def.into_inner() {
            match item.as_rule() {
                Rule::field => {
                    field(&item, None)?;
                }
                Rule::group => {
                    let scope = scope.unwrap_or_default();
                    self.group(item, scope, None)?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn field(pair: &Pair<'_, Rule>, oneof: Option<&str>) -> ProtoResult<FieldDecl> {
    let type_name = match child(pair, Rule::field_type).and_then(|t| t.into_inner().next()) {
        Some(map) if map.as_rule() == Rule::map_type => format!(
            "map<{}, {}>",
            child_text(&map, Rule::ident),
            child_text(&map, Rule::type_ref)
        ),
        Some(other) => other.as_str().to_string(),
        None => String::new(),
    };
    Ok(FieldDecl {
        name: child_text(pair, Rule::ident),
        type_name,
        number: field_number(pair)?,
        label: label(pair),
        oneof: oneof.map(str::to_string),
    })
}

fn label(pair: &Pair<'_, Rule>) -> FieldLabel {
    match child(pair, Rule::label).as_ref().map(Pair::as_str) {
        Some("repeated") => FieldLabel::Repeated,
        Some("optional") => FieldLabel::Optional,
        Some("required") => FieldLabel::Required,
        _ => FieldLabel::Singular,
    }
}

fn field_number(pair: &Pair<'_, Rule>) -> ProtoResult<u32> {
    let number = child(pair, Rule::field_number);
    let (line, column) = number.as_ref().unwrap_or(pair).line_col();
    let text = number.as_ref().map(Pair::as_str).unwrap_or_default();
    parse_field_number(text).ok_or_else(|| ProtoError::InvalidFieldNumber {
        text: text.to_string(),
        line,
        column,
    })
}

fn parse_field_number(text: &str) -> Option<u32> {
    let n = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if text.len() > 1 && text.starts_with('0') {
        u32::from_str_radix(&text[1..], 8).ok()?
    } else {
        text.parse().ok()?
    };
    (1..=536_870_911).contains(&n).then_some(n)
}

fn service(def: Pair<'_, Rule>) -> ServiceDecl {
    let name = child_text(&def, Rule::ident);
    let rpcs = def
        .into_inner()
        .filter(|p| p.as_rule() == Rule::rpc_def)
        .map(|rpc| {
            let mut types = rpc.clone().into_inner().filter(|p| p.as_rule() == Rule::rpc_type);
            let (client_streaming, request) = types.next().map(rpc_type).unwrap_or_default();
            let (server_streaming, response) = types.next().map(rpc_type).unwrap_or_default();
            RpcDecl {
                name: child_text(&rpc, Rule::ident),
                request,
                response,
                client_streaming,
                server_streaming,
            }
        })
        .collect();
    ServiceDecl { name, rpcs }
}

fn rpc_type(pair: Pair<'_, Rule>) -> (bool, String) {
    (
        child(&pair, Rule::stream).is_some(),
        child_text(&pair, Rule::type_ref),
    )
}

/// `(name, raw constant)`; option names are normalised by dropping whitespace.
fn option(stmt: &Pair<'_, Rule>) -> (String, String) {
    let name: String = child(stmt, Rule::option_name)
        .map(|p| p.as_str().split_whitespace().collect())
        .unwrap_or_default();
    let value = match child(stmt, Rule::constant).and_then(|c| c.into_inner().next()) {
        Some(s) if s.as_rule() == Rule::string => string_value(&s),
        Some(other) => other.as_str().to_string(),
        None => String::new(),
    };
    (name, value)
}

fn child<'i>(pair: &Pair<'i, Rule>, rule: Rule) -> Option<Pair<'i, Rule>> {
    pair.clone().into_inner().find(|p| p.as_rule() == rule)
}

fn child_text(pair: &Pair<'_, Rule>, rule: Rule) -> String {
    child(pair, rule)
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}

fn string_child(pair: &Pair<'_, Rule>) -> String {
    child(pair, Rule::string)
        .map(|s| string_value(&s))
        .unwrap_or_default()
}

/// Adjacent literals concatenate.
fn string_value(string: &Pair<'_, Rule>) -> String {
    string
        .clone()
        .into_inner()
        .filter_map(|lit| lit.into_inner().next())
        .map(|chars| unescape(chars.as_str()))
        .collect()
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('x' | 'X') => {
                let mut code = 0u32;
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(16)) {
                        Some(d) => {
                            code = code * 16 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(code));
            }
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(code));
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn qualify(scope: Option<&str>, name: &str) -> String {
    match scope {
        Some(s) if !s.is_empty() => format!("{s}.{name}"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX_PROTO: &str = r#"
syntax = "proto3";
package moon;

import "gogoproto/gogo.proto";
option go_package = "github.com/test/moon/x/moon/types";

// Msg defines the Msg service.
service Msg {
  rpc CreateUser(MsgCreateUser) returns (MsgCreateUserResponse);
  rpc DeleteUser(MsgDeleteUser) returns (MsgDeleteUserResponse) {
    option (google.api.http).post = "/moon/users";
  }
}

message MsgCreateUser {
  string creator = 1;
  repeated string tags = 2 [(gogoproto.nullable) = false];
  map<string, int64> scores = 3;
  oneof kind {
    string email = 4;
    uint64 phone = 5;
  }
  message Profile {
    string bio = 1;
    enum Mood { UNKNOWN = 0; HAPPY = 1; }
  }
  reserved 9, 10 to 12;
}

message MsgCreateUserResponse { uint64 id = 1; }
message MsgDeleteUser { string creator = 1; .moon.MsgCreateUser.Profile profile = 0x2; }
message MsgDeleteUserResponse {}
"#;

    #[test]
    fn test_parse_package_services_and_messages() {
        let file = parse_schema(TX_PROTO).unwrap();
        assert_eq!(file.syntax.as_deref(), Some("proto3"));
        assert_eq!(file.package.as_deref(), Some("moon"));
        assert_eq!(file.imports, vec!["gogoproto/gogo.proto".to_string()]);
        assert_eq!(
            file.options,
            vec![(
                "go_package".to_string(),
                "github.com/test/moon/x/moon/types".to_string()
            )]
        );

        let names: Vec<_> = file.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "MsgCreateUser",
                "MsgCreateUser.Profile",
                "MsgCreateUserResponse",
                "MsgDeleteUser",
                "MsgDeleteUserResponse"
            ]
        );
        assert_eq!(file.enums, vec!["MsgCreateUser.Profile.Mood".to_string()]);
        assert_eq!(file.message("MsgCreateUser").unwrap().line, 16);

        let service = &file.services[0];
        assert_eq!(service.name, "Msg");
        assert_eq!(service.rpcs.len(), 2);
        assert_eq!(service.rpcs[1].request, "MsgDeleteUser");
        assert_eq!(service.rpcs[1].response, "MsgDeleteUserResponse");
        assert!(!service.rpcs[0].client_streaming);
    }

    #[test]
    fn test_parse_fields() {
        let file = parse_schema(TX_PROTO).unwrap();
        let create = file.message("MsgCreateUser").unwrap();
        assert_eq!(create.fields.len(), 5);
        assert_eq!(create.fields[1].label, FieldLabel::Repeated);
        assert_eq!(create.fields[2].type_name, "map<string, int64>");
        assert_eq!(create.fields[3].oneof.as_deref(), Some("kind"));
        assert_eq!(create.fields[4].number, 5);

        let delete = file.message("MsgDeleteUser").unwrap();
        assert_eq!(delete.fields[1].type_name, ".moon.MsgCreateUser.Profile");
        assert_eq!(delete.fields[1].number, 2);
    }

    #[test]
    fn test_streaming_rpc() {
        let file = parse_schema(
            "package p; service Query { rpc Watch(stream A) returns (stream B); }",
        )
        .unwrap();
        let rpc = &file.services[0].rpcs[0];
        assert!(rpc.client_streaming && rpc.server_streaming);
        assert_eq!(rpc.request, "A");
    }

    #[test]
    fn test_keyword_prefixed_names_are_plain_types() {
        let file = parse_schema(
            "package p;\nmessage A {\n  optionalFlag flag = 1;\n  streamer s = 2;\n}\nservice S { rpc Get(stream) returns (streamer); }",
        )
        .unwrap();
        let a = file.message("A").unwrap();
        assert_eq!(a.fields[0].type_name, "optionalFlag");
        assert_eq!(a.fields[0].label, FieldLabel::Singular);
        let rpc = &file.services[0].rpcs[0];
        assert_eq!((rpc.request.as_str(), rpc.client_streaming), ("stream", false));
        assert_eq!((rpc.response.as_str(), rpc.server_streaming), ("streamer", false));
    }

    #[test]
    fn test_proto2_group_becomes_nested_message() {
        let file = parse_schema(
            "syntax = \"proto2\";\npackage p;\nmessage Search {\n  optional group Result = 1 {\n    required string url = 2;\n  }\n  repeated int32 ids = 3;\n}\n",
        )
        .unwrap();
        let names: Vec<_> = file.messages.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Search", "Search.Result"]);

        let search = file.message("Search").unwrap();
        assert_eq!(search.fields[0].name, "result");
        assert_eq!(search.fields[0].type_name, "Result");
        assert_eq!(search.fields[0].label, FieldLabel::Optional);
        assert_eq!(search.fields[1].number, 3);
        assert_eq!(file.message("Search.Result").unwrap().fields[0].label, FieldLabel::Required);
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let file = parse_schema("\u{feff}syntax = \"proto3\";\npackage moon;\nmessage A {}\n").unwrap();
        assert_eq!(file.package.as_deref(), Some("moon"));
        assert_eq!(file.messages.len(), 1);
    }

    #[test]
    fn test_option_constants() {
        let file = parse_schema(
            "option ratio = 1e-3;\noption neg = -0.5E+2;\noption big = 0x1F;\noption lim = -inf;\noption (my.ext).x = { a: 1 b: \"}\" };\noption name = \"a\" 'b\\x41';\noption flag = true;\n",
        )
        .unwrap();
        let values: Vec<_> = file.options.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
        assert_eq!(
            values,
            vec![
                ("ratio", "1e-3"),
                ("neg", "-0.5E+2"),
                ("big", "0x1F"),
                ("lim", "-inf"),
                ("(my.ext).x", "{ a: 1 b: \"}\" }"),
                ("name", "abA"),
                ("flag", "true"),
            ]
        );
    }

    #[test]
    fn test_editions_and_enum_options() {
        let file = parse_schema(
            "edition = \"2023\";\npackage p;\nenum Kind {\n  option allow_alias = true;\n  reserved 2, 15 to max;\n  reserved FOO;\n  A = 0;\n  B = -1 [deprecated = true];\n}\nmessage M { extensions 100 to 199; }\nextend M { int32 tag = 100; }\n",
        )
        .unwrap();
        assert_eq!(file.syntax.as_deref(), Some("2023"));
        assert_eq!(file.enums, vec!["Kind".to_string()]);
        assert!(file.message("M").unwrap().fields.is_empty());
    }

    #[test]
    fn test_missing_semicolon_reports_position() {
        let err = parse_schema("package moon\nmessage A {}").unwrap_err();
        assert_eq!(err.position(), (2, 1));
        assert!(err.to_string().contains("';'"), "{err}");
    }

    #[test]
    fn test_unclosed_message_is_an_error() {
        let err = parse_schema("package moon;\nmessage A {\n  string a = 1;\n").unwrap_err();
        assert!(matches!(err, ProtoError::Syntax { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_unterminated_comment_is_an_error() {
        let err = parse_schema("package moon;\n/* never closed\nmessage A {}\n").unwrap_err();
        assert!(matches!(err, ProtoError::Syntax { .. }));
    }

    #[test]
    fn test_zero_field_number_rejected() {
        let err = parse_schema("message A { string a = 0; }").unwrap_err();
        assert!(matches!(err, ProtoError::InvalidFieldNumber { .. }));
    }
}
