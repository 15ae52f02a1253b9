//! Scripted texts: the area catalog, greeting selection, option parsing and
//! the fixed replies of the conversation.

/// One selectable area of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub id: &'static str,
    pub title: &'static str,
}

pub const MENU_OPTIONS: [MenuOption; 6] = [
    MenuOption {
        id: "1",
        title: "RESPAD – Centro de Resposta em Ações Integradas para Atuação em Situações de Desastres",
    },
    MenuOption {
        id: "2",
        title: "VIPS – Centro Integrado de Operações de Combate à Violência contra as Pessoas Vulnerabilizadas",
    },
    MenuOption {
        id: "3",
        title: "CICCN – Centro Integrado de Comando e Controle Nacional",
    },
    MenuOption {
        id: "4",
        title: "CISPPA – Centro Integrado de Segurança Pública e Proteção Ambiental",
    },
    MenuOption {
        id: "5",
        title: "COPTEC – Centro de Operações de Proteção ao Torcedor e Eventos Culturais",
    },
    MenuOption {
        id: "6",
        title: "Outra situação",
    },
];

pub const REPROMPT: &str =
    "Por favor, digite apenas o número correspondente à opção desejada (1 a 6).";

pub const CLOSING: &str =
    "Agradecemos a mensagem. Em breve, alguém da nossa equipe entrará em contato.";

/// Keycap suffix turning `"1"` into the 1️⃣ emoji.
const KEYCAP: &str = "\u{fe0f}\u{20e3}";

/// Time-of-day greeting for a local hour (0–23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Bom dia"
    } else if hour < 18 {
        "Boa tarde"
    } else {
        "Boa noite"
    }
}

/// Find the first digit 1–6 that stands alone as a token in `text`.
///
/// A digit counts when neither neighbour is an ASCII word character
/// (`[A-Za-z0-9_]`), so `"opção 3 agora"` yields 3 but `"13"` and `"a3"`
/// yield nothing.
pub fn parse_option(text: &str) -> Option<&'static MenuOption> {
    let bytes = text.trim().as_bytes();
    bytes.iter().enumerate().find_map(|(i, &b)| {
        if !(b'1'..=b'6').contains(&b) {
            return None;
        }
        let before = i.checked_sub(1).map(|j| bytes[j]);
        let after = bytes.get(i + 1).copied();
        if before.is_some_and(is_word_byte) || after.is_some_and(is_word_byte) {
            return None;
        }
        let idx = (b - b'1') as usize;
        MENU_OPTIONS.get(idx)
    })
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Organization-specific wording of the conversation.
#[derive(Debug, Clone)]
pub struct Script {
    pub organization: String,
}

impl Script {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
        }
    }

    /// Greeting line followed by the numbered catalog.
    pub fn menu(&self, greeting: &str) -> String {
        let mut text = format!(
            "{greeting}! O {} agradece o seu contato. Como podemos ajudar? \
             Escolha a área e responda com o número correspondente:",
            self.organization
        );
        for option in &MENU_OPTIONS {
            text.push_str("\n\n");
            text.push_str(option.id);
            text.push_str(KEYCAP);
            text.push(' ');
            text.push_str(option.title);
        }
        text
    }

    pub fn confirmation(&self, option: &MenuOption) -> String {
        format!(
            "*Área selecionada:* {}\n\nCerto! Agora, por gentileza, nos diga como podemos ajudar.",
            option.title
        )
    }
}
