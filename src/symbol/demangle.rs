// Tue Jan 20 2026 - Alex

use super::error::{SymbolError, SymbolResult};
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DemangleOptions: u32 {
        /// Include the parameter list.
        const PARAMS = 1 << 0;
        /// Print `const` / `volatile` qualifiers.
        const ANSI = 1 << 1;
    }
}

impl Default for DemangleOptions {
    fn default() -> Self {
        DemangleOptions::PARAMS | DemangleOptions::ANSI
    }
}

pub trait Demangler {
    fn demangle(&self, mangled: &str, options: DemangleOptions) -> SymbolResult<String>;

    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Demangler for F
where
    F: Fn(&str, DemangleOptions) -> SymbolResult<String>,
{
    fn demangle(&self, mangled: &str, options: DemangleOptions) -> SymbolResult<String> {
        self(mangled, options)
    }
}

/// Demangler for the gcc 2.x ("GNU v2") C++ ABI.
#[derive(Debug, Clone, Copy, Default)]
pub struct GnuV2Demangler;

impl GnuV2Demangler {
    pub fn new() -> Self {
        Self
    }
}

impl Demangler for GnuV2Demangler {
    fn demangle(&self, mangled: &str, options: DemangleOptions) -> SymbolResult<String> {
        demangle_gnu_v2(mangled, options)
    }

    fn name(&self) -> &'static str {
        "gnu-v2"
    }
}

const OPERATORS: &[(&str, &str)] = &[
    ("nw", "new"),
    ("dl", "delete"),
    ("vn", "new []"),
    ("vd", "delete []"),
    ("as", "="),
    ("ne", "!="),
    ("eq", "=="),
    ("ge", ">="),
    ("gt", ">"),
    ("le", "<="),
    ("lt", "<"),
    ("pl", "+"),
    ("apl", "+="),
    ("mi", "-"),
    ("ami", "-="),
    ("ml", "*"),
    ("aml", "*="),
    ("dv", "/"),
    ("adv", "/="),
    ("md", "%"),
    ("amd", "%="),
    ("nt", "!"),
    ("aa", "&&"),
    ("oo", "||"),
    ("co", "~"),
    ("ad", "&"),
    ("aad", "&="),
    ("or", "|"),
    ("aor", "|="),
    ("er", "^"),
    ("aer", "^="),
    ("ls", "<<"),
    ("als", "<<="),
    ("rs", ">>"),
    ("ars", ">>="),
    ("pp", "++"),
    ("mm", "--"),
    ("cl", "()"),
    ("vc", "[]"),
    ("rf", "->"),
    ("rm", "->*"),
    ("cm", ","),
    ("cn", "?:"),
    ("mx", ">?"),
    ("mn", "<?"),
];

pub fn demangle_gnu_v2(mangled: &str, options: DemangleOptions) -> SymbolResult<String> {
    if mangled.is_empty() {
        return Err(SymbolError::demangle_failed(mangled, "empty symbol"));
    }
    if !mangled.is_ascii() {
        return Err(SymbolError::demangle_failed(mangled, "non-ASCII characters in symbol"));
    }
    if mangled.starts_with("_vt") || mangled.starts_with("_GLOBAL_") {
        return Err(SymbolError::demangle_failed(mangled, "not a member function symbol"));
    }

    if let Some(class) = mangled.strip_prefix("_$_").or_else(|| mangled.strip_prefix("_._")) {
        return demangle_destructor(class, options)
            .ok_or_else(|| SymbolError::demangle_failed(mangled, "invalid destructor"));
    }

    let splits = signature_splits(mangled);
    if splits.is_empty() {
        return Err(SymbolError::demangle_failed(mangled, "no `__` signature separator"));
    }

    // Names may contain `__` themselves, so the last separator wins.
    splits
        .iter()
        .rev()
        .find_map(|&split| demangle_function(&mangled[..split], &mangled[split + 2..], options))
        .ok_or_else(|| SymbolError::demangle_failed(mangled, "does not match the GNU v2 mangling grammar"))
}

// Position of the last `__` pair in every run of two or more underscores.
fn signature_splits(mangled: &str) -> Vec<usize> {
    let bytes = mangled.as_bytes();
    let mut splits = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'_' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'_' {
                i += 1;
            }
            if i - start >= 2 {
                splits.push(i - 2);
            }
        } else {
            i += 1;
        }
    }

    splits
}

fn demangle_destructor(class: &str, options: DemangleOptions) -> Option<String> {
    let mut parser = GnuV2Parser::new(class, options);
    let class = parser.parse_class_name()?;
    if !parser.at_end() {
        return None;
    }

    let mut result = format!("{}::~{}", class.full, class.last);
    if options.contains(DemangleOptions::PARAMS) {
        result.push_str("(void)");
    }
    Some(result)
}

fn demangle_function(name: &str, signature: &str, options: DemangleOptions) -> Option<String> {
    let mut parser = GnuV2Parser::new(signature, options);
    let mut qualifiers = Vec::new();

    loop {
        match parser.peek()? {
            b'C' => {
                qualifiers.push("const");
                parser.advance();
            }
            b'V' => {
                qualifiers.push("volatile");
                parser.advance();
            }
            b'S' => parser.advance(),
            _ => break,
        }
    }

    let class = match parser.peek()? {
        b'0'..=b'9' | b'Q' | b't' => {
            let class = parser.parse_class_name()?;
            parser.remember(class.full.clone());
            Some(class)
        }
        b'F' if qualifiers.is_empty() => {
            parser.advance();
            None
        }
        _ => return None,
    };

    let function_name = match (name, &class) {
        ("", Some(class)) => class.last.clone(),
        ("", None) => return None,
        (operator, _) if operator.starts_with("__") => operator_name(&operator[2..], options)?,
        (plain, _) => plain.to_string(),
    };

    let args = parser.parse_arg_list(false)?;
    if !parser.at_end() {
        return None;
    }

    let mut result = String::new();
    if let Some(class) = class {
        result.push_str(&class.full);
        result.push_str("::");
    }
    result.push_str(&function_name);

    if options.contains(DemangleOptions::PARAMS) {
        result.push_str(&format_params(&args));
        if options.contains(DemangleOptions::ANSI) {
            for qualifier in qualifiers {
                result.push(' ');
                result.push_str(qualifier);
            }
        }
    }

    Some(result)
}

fn operator_name(code: &str, options: DemangleOptions) -> Option<String> {
    if let Some(mangled_type) = code.strip_prefix("op") {
        let mut parser = GnuV2Parser::new(mangled_type, options);
        let target = parser.parse_type()?;
        if !parser.at_end() {
            return None;
        }
        return Some(format!("operator {}", target));
    }

    let (_, symbol) = OPERATORS.iter().find(|(mangled, _)| *mangled == code)?;
    if symbol.starts_with(|c: char| c.is_ascii_lowercase()) {
        Some(format!("operator {}", symbol))
    } else {
        Some(format!("operator{}", symbol))
    }
}

fn format_params(args: &[String]) -> String {
    if args.is_empty() {
        "(void)".to_string()
    } else {
        format!("({})", args.join(", "))
    }
}

fn qualifier_name(code: u8) -> Option<&'static str> {
    match code {
        b'C' => Some("const"),
        b'V' => Some("volatile"),
        b'u' => Some("__restrict"),
        _ => None,
    }
}

fn builtin_type_name(code: u8) -> Option<&'static str> {
    match code {
        b'v' => Some("void"),
        b'x' => Some("long long"),
        b'l' => Some("long"),
        b'i' => Some("int"),
        b's' => Some("short"),
        b'b' => Some("bool"),
        b'c' => Some("char"),
        b'w' => Some("wchar_t"),
        b'r' => Some("long double"),
        b'd' => Some("double"),
        b'f' => Some("float"),
        _ => None,
    }
}

fn wrap_declarator(decl: &mut String) {
    if decl.starts_with('*') || decl.starts_with('&') {
        decl.insert(0, '(');
        decl.push(')');
    }
}

fn append_blank(s: &mut String) {
    if !s.is_empty() {
        s.push(' ');
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ClassName {
    /// Fully qualified spelling, including template arguments.
    full: String,
    /// Innermost name without template arguments, used for ctor/dtor names.
    last: String,
}

struct GnuV2Parser<'a> {
    input: &'a str,
    pos: usize,
    options: DemangleOptions,
    types: Vec<String>,
}

impl<'a> GnuV2Parser<'a> {
    fn new(input: &'a str, options: DemangleOptions) -> Self {
        Self {
            input,
            pos: 0,
            options,
            types: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn expect(&mut self, c: u8) -> Option<()> {
        if self.peek()? == c {
            self.advance();
            Some(())
        } else {
            None
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn ansi(&self) -> bool {
        self.options.contains(DemangleOptions::ANSI)
    }

    fn remember(&mut self, ty: String) {
        self.types.push(ty);
    }

    fn consume_count(&mut self) -> Option<usize> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
        if start == self.pos {
            return None;
        }
        self.input[start..self.pos].parse().ok()
    }

    // A single digit, or a multi-digit count terminated by `_`.
    fn get_count(&mut self) -> Option<usize> {
        let first = self.peek().filter(u8::is_ascii_digit)?;
        self.advance();
        let single = (first - b'0') as usize;

        if !matches!(self.peek(), Some(b'0'..=b'9')) {
            return Some(single);
        }

        let saved = self.pos;
        let mut value = single;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            value = value.checked_mul(10)?.checked_add((digit - b'0') as usize)?;
            self.advance();
        }
        if self.peek() == Some(b'_') {
            self.advance();
            Some(value)
        } else {
            self.pos = saved;
            Some(single)
        }
    }

    fn consume_count_with_underscores(&mut self) -> Option<usize> {
        if self.peek()? == b'_' {
            self.advance();
            let count = self.consume_count()?;
            self.expect(b'_')?;
            Some(count)
        } else {
            let digit = self.peek().filter(u8::is_ascii_digit)?;
            self.advance();
            Some((digit - b'0') as usize)
        }
    }

    fn parse_source_name(&mut self) -> Option<&'a str> {
        let len = self.consume_count()?;
        if len == 0 {
            return None;
        }
        let name = self.input.get(self.pos..self.pos.checked_add(len)?)?;
        self.pos += len;
        Some(name)
    }

    fn parse_class_name(&mut self) -> Option<ClassName> {
        match self.peek()? {
            b'Q' => {
                self.advance();
                self.parse_qualified()
            }
            b't' => {
                self.advance();
                self.parse_template()
            }
            b'0'..=b'9' => {
                let name = self.parse_source_name()?.to_string();
                Some(ClassName { full: name.clone(), last: name })
            }
            _ => None,
        }
    }

    fn parse_qualified(&mut self) -> Option<ClassName> {
        let count = if self.peek()? == b'_' {
            self.advance();
            let count = self.consume_count()?;
            self.expect(b'_')?;
            count
        } else {
            let digit = self.peek().filter(u8::is_ascii_digit)?;
            self.advance();
            (digit - b'0') as usize
        };
        if count == 0 {
            return None;
        }

        let mut parts = Vec::with_capacity(count);
        let mut last = String::new();
        for _ in 0..count {
            let part = if self.peek()? == b't' {
                self.advance();
                self.parse_template()?
            } else {
                let name = self.parse_source_name()?.to_string();
                ClassName { full: name.clone(), last: name }
            };
            last = part.last;
            parts.push(part.full);
        }

        Some(ClassName { full: parts.join("::"), last })
    }

    // t<name><count><params>, with the leading `t` already consumed.
    fn parse_template(&mut self) -> Option<ClassName> {
        let name = self.parse_source_name()?.to_string();
        let count = self.get_count()?;
        let mut params = Vec::with_capacity(count);

        for _ in 0..count {
            if self.peek()? == b'Z' {
                self.advance();
                params.push(self.parse_type()?);
            } else {
                let param_type = self.parse_type()?;
                params.push(self.parse_template_value(&param_type)?);
            }
        }

        let mut full = format!("{}<{}", name, params.join(", "));
        if full.ends_with('>') {
            full.push(' ');
        }
        full.push('>');
        Some(ClassName { full, last: name })
    }

    fn parse_template_value(&mut self, param_type: &str) -> Option<String> {
        let base = param_type
            .trim_start_matches("const ")
            .trim_start_matches("unsigned ")
            .trim_start_matches("signed ");

        match base {
            "bool" => {
                let value = match self.peek()? {
                    b'0' => "false",
                    b'1' => "true",
                    _ => return None,
                };
                self.advance();
                Some(value.to_string())
            }
            "char" | "short" | "int" | "long" | "long long" | "wchar_t" => self.parse_integral_value(),
            _ => None,
        }
    }

    fn parse_integral_value(&mut self) -> Option<String> {
        let mut value = String::new();
        if self.peek()? == b'm' {
            value.push('-');
            self.advance();
        }
        value.push_str(&self.consume_count_with_underscores()?.to_string());
        Some(value)
    }

    fn parse_arg_list(&mut self, nested: bool) -> Option<Vec<String>> {
        let mut args = Vec::new();

        loop {
            match self.peek() {
                None => break,
                Some(b'_') if nested => break,
                Some(b'T') => {
                    self.advance();
                    let index = self.get_count()?;
                    args.push(self.types.get(index)?.clone());
                }
                Some(b'N') => {
                    self.advance();
                    let repeat = self.get_count()?;
                    let index = self.get_count()?;
                    let ty = self.types.get(index)?.clone();
                    args.extend(std::iter::repeat(ty).take(repeat));
                }
                Some(b'e') => {
                    self.advance();
                    args.push("...".to_string());
                }
                Some(_) => {
                    let ty = self.parse_type()?;
                    self.remember(ty.clone());
                    args.push(ty);
                }
            }
        }

        Some(args)
    }

    fn parse_type(&mut self) -> Option<String> {
        // Declarator text, built outward from the base type.
        let mut decl = String::new();

        loop {
            match self.peek()? {
                b'P' | b'p' => {
                    self.advance();
                    decl.insert(0, '*');
                }
                b'R' => {
                    self.advance();
                    decl.insert(0, '&');
                }
                b'A' => {
                    self.advance();
                    wrap_declarator(&mut decl);
                    let size = if self.peek()? == b'_' {
                        String::new()
                    } else {
                        self.parse_integral_value()?
                    };
                    if self.peek() == Some(b'_') {
                        self.advance();
                    }
                    decl.push('[');
                    decl.push_str(&size);
                    decl.push(']');
                }
                b'F' => {
                    self.advance();
                    wrap_declarator(&mut decl);
                    let args = self.parse_arg_list(true)?;
                    decl.push_str(&format_params(&args));
                    self.expect(b'_')?;
                }
                code @ (b'M' | b'O') => {
                    self.advance();
                    let class = self.parse_class_name()?;
                    decl = format!("({}::{})", class.full, decl);

                    let mut qualifier = None;
                    if code == b'M' {
                        qualifier = self.peek().and_then(qualifier_name);
                        if qualifier.is_some() {
                            self.advance();
                        }
                        self.expect(b'F')?;
                        let args = self.parse_arg_list(true)?;
                        decl.push_str(&format_params(&args));
                    }
                    self.expect(b'_')?;

                    if let Some(qualifier) = qualifier.filter(|_| self.ansi()) {
                        decl.push(' ');
                        decl.push_str(qualifier);
                    }
                }
                code @ (b'C' | b'V' | b'u') if self.peek_at(1) == Some(b'P') => {
                    self.advance();
                    if self.ansi() {
                        if !decl.is_empty() {
                            decl.insert(0, ' ');
                        }
                        decl.insert_str(0, qualifier_name(code)?);
                    }
                }
                _ => break,
            }
        }

        let mut result = self.parse_fundamental_type()?;
        if !decl.is_empty() {
            result.push(' ');
            result.push_str(&decl);
        }
        Some(result)
    }

    fn parse_fundamental_type(&mut self) -> Option<String> {
        let mut result = String::new();

        loop {
            match self.peek()? {
                code @ (b'C' | b'V' | b'u') => {
                    self.advance();
                    if self.ansi() {
                        if !result.is_empty() {
                            result.insert(0, ' ');
                        }
                        result.insert_str(0, qualifier_name(code)?);
                    }
                }
                b'U' => {
                    self.advance();
                    append_blank(&mut result);
                    result.push_str("unsigned");
                }
                b'S' => {
                    self.advance();
                    append_blank(&mut result);
                    result.push_str("signed");
                }
                b'J' => {
                    self.advance();
                    append_blank(&mut result);
                    result.push_str("__complex");
                }
                _ => break,
            }
        }

        let base = match self.peek()? {
            b'G' => {
                self.advance();
                if !matches!(self.peek()?, b'0'..=b'9' | b'Q' | b't') {
                    return None;
                }
                self.parse_class_name()?.full
            }
            b'0'..=b'9' | b'Q' | b't' => self.parse_class_name()?.full,
            code => {
                let name = builtin_type_name(code)?;
                self.advance();
                name.to_string()
            }
        };

        append_blank(&mut result);
        result.push_str(&base);
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demangle(s: &str) -> String {
        GnuV2Demangler.demangle(s, DemangleOptions::default()).unwrap()
    }

    #[test]
    fn test_query_interface() {
        assert_eq!(
            demangle("QueryInterface__7cSC3AppUlPPv"),
            "cSC3App::QueryInterface(unsigned long, void **)"
        );
    }

    #[test]
    fn test_method_without_params() {
        assert_eq!(demangle("AddRef__7cSC3App"), "cSC3App::AddRef(void)");
        assert_eq!(demangle("Release__7cSC3Appv"), "cSC3App::Release(void)");
    }

    #[test]
    fn test_const_method_and_qualifiers() {
        assert_eq!(demangle("GetName__C4cFoo"), "cFoo::GetName(void) const");
        assert_eq!(demangle("SetName__4cFooPCc"), "cFoo::SetName(const char *)");
        assert_eq!(demangle("Assign__4cFooRC4cFoo"), "cFoo::Assign(const cFoo &)");
        assert_eq!(demangle("Set__4cFooCPc"), "cFoo::Set(char *const)");
    }

    #[test]
    fn test_free_function() {
        assert_eq!(demangle("Init__Fi"), "Init(int)");
        assert_eq!(demangle("Log__FPCce"), "Log(const char *, ...)");
    }

    #[test]
    fn test_ctor_dtor_and_operators() {
        assert_eq!(demangle("__7cSC3App"), "cSC3App::cSC3App(void)");
        assert_eq!(demangle("_$_7cSC3App"), "cSC3App::~cSC3App(void)");
        assert_eq!(demangle("_._4cFoo"), "cFoo::~cFoo(void)");
        assert_eq!(demangle("__as__4cFooRC4cFoo"), "cFoo::operator=(const cFoo &)");
        assert_eq!(demangle("__nw__4cFooUi"), "cFoo::operator new(unsigned int)");
        assert_eq!(demangle("__opb__C4cFoo"), "cFoo::operator bool(void) const");
    }

    #[test]
    fn test_qualified_and_template_names() {
        assert_eq!(demangle("Run__Q24cFoo4cBari"), "cFoo::cBar::Run(int)");
        assert_eq!(demangle("size__Ct6vector1Zi"), "vector<int>::size(void) const");
        assert_eq!(
            demangle("Get__4cFooRCt6vector1Zt6vector1Zi"),
            "cFoo::Get(const vector<vector<int> > &)"
        );
        assert_eq!(demangle("Fill__4cFooRt5array2Zii_16_"), "cFoo::Fill(array<int, 16> &)");
    }

    #[test]
    fn test_back_references() {
        assert_eq!(demangle("Swap__4cFooR4cFooT1"), "cFoo::Swap(cFoo &, cFoo &)");
        assert_eq!(demangle("Copy__4cFooRC4cFooT0"), "cFoo::Copy(const cFoo &, cFoo)");
        assert_eq!(demangle("Move__4cFooiN31"), "cFoo::Move(int, int, int, int)");
    }

    #[test]
    fn test_function_and_member_pointers() {
        assert_eq!(demangle("SetCallback__4cFooPFPv_v"), "cFoo::SetCallback(void (*)(void *))");
        assert_eq!(demangle("Bind__4cFooPM4cBarFi_v"), "cFoo::Bind(void (cBar::*)(int))");
        assert_eq!(demangle("Fill__4cFooPA4_i"), "cFoo::Fill(int (*)[4])");
    }

    #[test]
    fn test_names_with_embedded_separator() {
        assert_eq!(demangle("Do__Work__4cFoo"), "cFoo::Do__Work(void)");
    }

    #[test]
    fn test_without_params_option() {
        let result = GnuV2Demangler
            .demangle("QueryInterface__7cSC3AppUlPPv", DemangleOptions::empty())
            .unwrap();
        assert_eq!(result, "cSC3App::QueryInterface");
    }

    #[test]
    fn test_malformed_symbols_fail() {
        for input in ["", "main", "Foo__", "Foo__7cSC3", "_vt$7cSC3App", "Foo__4cFooZ"] {
            let result = GnuV2Demangler.demangle(input, DemangleOptions::default());
            assert!(
                matches!(result, Err(SymbolError::DemangleFailed { .. })),
                "expected failure for {:?}, got {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_closure_demangler() {
        let stub = |name: &str, _: DemangleOptions| -> SymbolResult<String> { Ok(format!("x::{}()", name)) };
        assert_eq!(stub.demangle("y", DemangleOptions::default()).unwrap(), "x::y()");
        assert_eq!(stub.name(), "custom");
        assert_eq!(GnuV2Demangler.name(), "gnu-v2");
    }

    #[test]
    fn test_long_double() {
        assert_eq!(demangle("Scale__4cFoor"), "cFoo::Scale(long double)");
    }
}
