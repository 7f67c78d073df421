//! Canned reply texts

pub const MENU: &str = "📋 *Menu*\n1️⃣ Preços\n2️⃣ Suporte\n3️⃣ Falar com um atendente";

pub const MENU_REPROMPT: &str = "❗ Por favor, escolha 1, 2 ou 3.";

pub const PRICING: &str = "💰 *Preços*\nPlano Básico: R$ 50/mês\nPlano Pro: R$ 120/mês";

pub const SUPPORT_PROMPT: &str = "🛠 Descreva seu problema, por favor.";

pub const URGENCY_PROMPT: &str = "⚠️ Qual a urgência do problema? (baixa / média / alta)";

pub const URGENCY_REPROMPT: &str = "Por favor, responda com: baixa, média ou alta.";

pub const TICKET_CONFIRMED: &str = "✅ Chamado registrado com sucesso!";

pub const HUMAN_HANDOFF: &str = "👤 Um atendente humano entrará em contato.";

pub const GREETING: &str = "Olá! 👋 Digite *menu* para ver as opções.";

pub const SERVICES: &str =
    "Oferecemos:\n🤖 Chatbots para WhatsApp\n⚙️ Automações\n📊 Integrações com sistemas";

pub const FALLBACK: &str = "❓ Não entendi sua mensagem.\nDigite *menu* para ver as opções.";

/// Sent whenever handling a message fails
pub const APOLOGY: &str =
    "⚠️ Ocorreu um erro inesperado.\nPor favor, tente novamente em alguns instantes.";
