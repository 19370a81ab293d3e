// Tue Jan 20 2026 - Alex

use crate::config::Config;
use log::{debug, trace, warn};
use std::fmt;

pub const QUALIFIER_SEPARATOR: &str = "::";

/// Number of reference-counting methods that follow `QueryInterface` in an
/// unknown-interface class (`AddRef`, `Release`).
pub const REFERENCE_COUNT_METHODS: usize = 2;

/// Represents the `class X : public Base` block at the top of the declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    /// `None` when the first signature had no `Class::` qualifier.
    pub name: Option<String>,
    pub base_class: Option<String>,
    pub include: Option<String>,
}

impl ClassHeader {
    pub fn plain(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            base_class: None,
            include: None,
        }
    }

    pub fn unqualified() -> Self {
        Self {
            name: None,
            base_class: None,
            include: None,
        }
    }
}

impl fmt::Display for ClassHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class")?;
        if let Some(ref name) = self.name {
            write!(f, " {}", name)?;
        }
        if let Some(ref base) = self.base_class {
            write!(f, " : public {}", base)?;
        }
        Ok(())
    }
}

/// A pure-virtual interface declaration built from a symbol list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub header: Option<ClassHeader>,
    pub members: Vec<String>,
    pub suppressed: Vec<String>,
    pub member_indent: String,
}

impl InterfaceDeclaration {
    pub fn new(member_indent: &str) -> Self {
        Self {
            header: None,
            members: Vec::new(),
            suppressed: Vec::new(),
            member_indent: member_indent.to_string(),
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        self.header.as_ref().and_then(|h| h.name.as_deref())
    }

    pub fn is_unknown_interface(&self) -> bool {
        self.header.as_ref().map_or(false, |h| h.base_class.is_some())
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn member_line(&self, member: &str) -> String {
        format!("{}virtual void* {} = 0;", self.member_indent, member)
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.members.len() + 6);

        if let Some(ref header) = self.header {
            if let Some(ref include) = header.include {
                lines.push(format!("#include \"{}\"", include));
                lines.push(String::new());
            }
            lines.push(header.to_string());
            lines.push("{".to_string());
            lines.push("public:".to_string());
        }

        for member in &self.members {
            lines.push(self.member_line(member));
        }

        lines.push("};".to_string());
        lines
    }

    /// Generate the C++ source text, one line per entry
    pub fn to_cpp(&self) -> String {
        let mut code = String::new();
        for line in self.lines() {
            code.push_str(&line);
            code.push('\n');
        }
        code
    }
}

impl fmt::Display for InterfaceDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_cpp())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    AwaitingClassHeader,
    EmittingMembers {
        member_name_start: usize,
        suppress_remaining: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Member,
    Suppressed,
}

/// Consumes normalized signatures in order and builds one interface declaration.
pub struct InterfaceAssembler<'c> {
    config: &'c Config,
    state: AssemblerState,
    line_index: usize,
    is_unknown_interface: bool,
    declaration: InterfaceDeclaration,
}

impl<'c> InterfaceAssembler<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            state: AssemblerState::AwaitingClassHeader,
            line_index: 0,
            is_unknown_interface: false,
            declaration: InterfaceDeclaration::new(&config.member_indent),
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn is_unknown_interface(&self) -> bool {
        self.is_unknown_interface
    }

    pub fn push(&mut self, signature: &str) -> LineOutcome {
        let outcome = match self.state {
            AssemblerState::AwaitingClassHeader => self.begin_class(signature),
            AssemblerState::EmittingMembers { member_name_start, suppress_remaining } if suppress_remaining > 0 => {
                self.state = AssemblerState::EmittingMembers {
                    member_name_start,
                    suppress_remaining: suppress_remaining - 1,
                };
                self.suppress(signature, member_name_start)
            }
            AssemblerState::EmittingMembers { member_name_start, .. } => {
                self.emit_member(signature, member_name_start)
            }
        };

        self.line_index += 1;
        outcome
    }

    pub fn finish(self) -> InterfaceDeclaration {
        if self.state == AssemblerState::AwaitingClassHeader {
            warn!("No symbols were processed, the declaration has no class header");
        }
        self.declaration
    }

    fn begin_class(&mut self, signature: &str) -> LineOutcome {
        let Some(index) = signature.find(QUALIFIER_SEPARATOR) else {
            warn!("First signature `{}` has no class qualifier, emitting a bare class header", signature);
            self.declaration.header = Some(ClassHeader::unqualified());
            self.state = AssemblerState::EmittingMembers {
                member_name_start: 0,
                suppress_remaining: 0,
            };
            return self.emit_member(signature, 0);
        };

        let class_name = &signature[..index];
        let member_name_start = index + QUALIFIER_SEPARATOR.len();
        let member = &signature[member_name_start..];

        if member == self.config.unknown_interface_method {
            let name = interface_name(class_name, self.config);
            debug!("{} is an unknown-interface class, declaring {}", class_name, name);

            self.is_unknown_interface = true;
            self.declaration.header = Some(ClassHeader {
                name: Some(name),
                base_class: Some(self.config.base_interface.clone()),
                include: Some(self.config.base_interface_header.clone()),
            });
            self.state = AssemblerState::EmittingMembers {
                member_name_start,
                suppress_remaining: REFERENCE_COUNT_METHODS,
            };
            // QueryInterface is inherited from the base interface.
            self.suppress(signature, member_name_start)
        } else {
            debug!("Declaring plain class {}", class_name);

            self.declaration.header = Some(ClassHeader::plain(class_name));
            self.state = AssemblerState::EmittingMembers {
                member_name_start,
                suppress_remaining: 0,
            };
            self.emit_member(signature, member_name_start)
        }
    }

    fn emit_member(&mut self, signature: &str, member_name_start: usize) -> LineOutcome {
        let member = member_text(signature, member_name_start);
        trace!("[{}] member {}", self.line_index, member);
        self.declaration.members.push(member.to_string());
        LineOutcome::Member
    }

    fn suppress(&mut self, signature: &str, member_name_start: usize) -> LineOutcome {
        let member = member_text(signature, member_name_start);
        trace!("[{}] suppressed {}", self.line_index, member);
        self.declaration.suppressed.push(member.to_string());
        LineOutcome::Suppressed
    }
}

fn member_text(signature: &str, member_name_start: usize) -> &str {
    match signature.get(member_name_start..) {
        Some(member) => member,
        None => {
            warn!(
                "Signature `{}` is shorter than the class prefix of the first line, keeping it whole",
                signature
            );
            signature
        }
    }
}

/// Public interface spelling of an implementation class name.
///
/// With the default conventions `cRZLanguageManager` becomes
/// `cIGZLanguageManager` and `cSC3App` becomes `cISC3App`. Names that start
/// with neither prefix are kept.
pub fn interface_name(class_name: &str, config: &Config) -> String {
    if let Some(rest) = class_name.strip_prefix(config.reserved_prefix.as_str()) {
        format!("{}{}", config.interface_prefix, rest)
    } else if let Some(rest) = class_name.strip_prefix(config.class_prefix.as_str()) {
        format!("{}{}", config.class_interface_prefix, rest)
    } else {
        class_name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(config: &Config, signatures: &[&str]) -> InterfaceDeclaration {
        let mut assembler = InterfaceAssembler::new(config);
        for signature in signatures {
            assembler.push(signature);
        }
        assembler.finish()
    }

    #[test]
    fn test_interface_name_rewrites() {
        let config = Config::default();
        assert_eq!(interface_name("cRZLanguageManager", &config), "cIGZLanguageManager");
        assert_eq!(interface_name("cSC3App", &config), "cISC3App");
        assert_eq!(interface_name("GZApp", &config), "GZApp");
    }

    #[test]
    fn test_class_prefix_rewrite_is_configurable() {
        let config = Config::default().with_class_prefix_rewrite("k", "kI");
        assert_eq!(interface_name("kWorld", &config), "kIWorld");
        assert_eq!(interface_name("cSC3App", &config), "cSC3App");
        assert_eq!(interface_name("cRZSystem", &config), "cIGZSystem");

        let declaration = assemble(&config, &["kWorld::QueryInterface(uint32_t, void**)"]);
        assert_eq!(declaration.class_name(), Some("kIWorld"));
    }

    #[test]
    fn test_unknown_interface_class() {
        let config = Config::default();
        let declaration = assemble(
            &config,
            &[
                "cSC3App::QueryInterface(uint32_t, void**)",
                "cSC3App::AddRef(void)",
                "cSC3App::Release(void)",
                "cSC3App::Init(void)",
                "cSC3App::SetName(int8_t const*)",
            ],
        );

        assert!(declaration.is_unknown_interface());
        assert_eq!(declaration.class_name(), Some("cISC3App"));
        assert_eq!(declaration.suppressed.len(), 3);
        assert_eq!(
            declaration.lines(),
            vec![
                "#include \"cIGZUnknown.h\"",
                "",
                "class cISC3App : public cIGZUnknown",
                "{",
                "public:",
                "    virtual void* Init(void) = 0;",
                "    virtual void* SetName(int8_t const*) = 0;",
                "};",
            ]
        );
    }

    #[test]
    fn test_reserved_prefix_interface() {
        let config = Config::default();
        let declaration = assemble(&config, &["cRZLanguageManager::QueryInterface(uint32_t, void**)"]);
        assert_eq!(declaration.class_name(), Some("cIGZLanguageManager"));
        assert!(declaration.members.is_empty());
    }

    #[test]
    fn test_plain_class_keeps_first_member() {
        let config = Config::default();
        let declaration = assemble(
            &config,
            &["cFoo::Bar(int32_t)", "cFoo::Baz(void)", "cFoo::Qux(void)"],
        );

        assert!(!declaration.is_unknown_interface());
        assert_eq!(
            declaration.to_cpp(),
            "class cFoo\n{\npublic:\n    virtual void* Bar(int32_t) = 0;\n    virtual void* Baz(void) = 0;\n    virtual void* Qux(void) = 0;\n};\n"
        );
    }

    #[test]
    fn test_state_transitions() {
        let config = Config::default();
        let mut assembler = InterfaceAssembler::new(&config);
        assert_eq!(assembler.state(), AssemblerState::AwaitingClassHeader);

        assert_eq!(
            assembler.push("cSC3App::QueryInterface(uint32_t, void**)"),
            LineOutcome::Suppressed
        );
        assert_eq!(
            assembler.state(),
            AssemblerState::EmittingMembers { member_name_start: 9, suppress_remaining: 2 }
        );
        assert_eq!(assembler.push("cSC3App::AddRef(void)"), LineOutcome::Suppressed);
        assert_eq!(assembler.push("cSC3App::Release(void)"), LineOutcome::Suppressed);
        assert_eq!(assembler.push("cSC3App::Init(void)"), LineOutcome::Member);
        assert_eq!(assembler.line_index(), 4);
        assert!(assembler.is_unknown_interface());
    }

    #[test]
    fn test_unqualified_first_line() {
        let config = Config::default();
        let declaration = assemble(&config, &["Init(int32_t)", "Shutdown(void)"]);

        assert_eq!(declaration.class_name(), None);
        assert_eq!(
            declaration.lines(),
            vec![
                "class",
                "{",
                "public:",
                "    virtual void* Init(int32_t) = 0;",
                "    virtual void* Shutdown(void) = 0;",
                "};",
            ]
        );
    }

    #[test]
    fn test_empty_input_only_closes() {
        let config = Config::default();
        let declaration = assemble(&config, &[]);
        assert_eq!(declaration.lines(), vec!["};"]);
    }

    #[test]
    fn test_short_signature_is_kept_whole() {
        let config = Config::default();
        let declaration = assemble(&config, &["cLongClassName::Init(void)", "f(void)"]);
        assert_eq!(declaration.members, vec!["Init(void)", "f(void)"]);
    }
}
