use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a throwaway project tree laid out like a module-based chain.
pub struct ProjectFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn canonical_root(&self) -> PathBuf {
        self.dir.path().canonicalize().unwrap()
    }

    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn go_mod(self, module_path: &str) -> Self {
        let content = format!("module {module_path}\n\ngo 1.16\n");
        self.file("go.mod", &content)
    }

    /// A `tx.proto`-style file declaring a Msg service with one rpc per message.
    pub fn proto(self, rel: &str, package: &str, messages: &[&str]) -> Self {
        let mut content = format!("syntax = \"proto3\";\npackage {package};\n\nservice Msg {{\n");
        for m in messages {
            let rpc = m.trim_start_matches("Msg");
            content.push_str(&format!("  rpc {rpc}({m}) returns ({m}Response);\n"));
        }
        content.push_str("}\n\n");
        for m in messages {
            content.push_str(&format!(
                "message {m} {{\n  string creator = 1;\n}}\n\nmessage {m}Response {{}}\n\n"
            ));
        }
        self.file(rel, &content)
    }

    /// `x/<module>/types/codec.go` registering the given messages.
    pub fn codec(self, module: &str, messages: &[&str]) -> Self {
        let mut content = String::from(
            "package types\n\nimport (\n\t\"github.com/cosmos/cosmos-sdk/codec\"\n\tcdctypes \"github.com/cosmos/cosmos-sdk/codec/types\"\n\tsdk \"github.com/cosmos/cosmos-sdk/types\"\n)\n\nfunc RegisterCodec(cdc *codec.LegacyAmino) {\n",
        );
        for m in messages {
            content.push_str(&format!(
                "\tcdc.RegisterConcrete(&{m}{{}}, \"{module}/{m}\", nil)\n"
            ));
        }
        content.push_str("}\n\nfunc RegisterInterfaces(registry cdctypes.InterfaceRegistry) {\n");
        if !messages.is_empty() {
            content.push_str("\tregistry.RegisterImplementations((*sdk.Msg)(nil),\n");
            for m in messages {
                content.push_str(&format!("\t\t&{m}{{}},\n"));
            }
            content.push_str("\t)\n");
        }
        content.push_str("}\n");
        self.file(&format!("x/{module}/types/codec.go"), &content)
    }
}

/// The canonical single-module project: package `moon` with three messages.
#[allow(dead_code)]
pub fn moon_project() -> ProjectFixture {
    let messages = ["MsgCreateUser", "MsgDeleteUser", "MsgUpdateUser"];
    ProjectFixture::new()
        .go_mod("github.com/test/moon")
        .proto("proto/moon/tx.proto", "moon", &messages)
        .codec("moon", &messages)
}
