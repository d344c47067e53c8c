//! Prompt text fragments.
//!
//! A [`PromptTemplates`] value holds every piece of text the assembler
//! stitches together. It is resolved once at startup: either from a JSON file
//! (any missing field keeps its built-in text) or from the built-in set.
//! Per request, active configuration sections may replace individual slots
//! via [`PromptTemplates::with_section_overrides`].
//!
//! Placeholders are substituted literally:
//! `{format}`, `{style}`, `{category}`, `{count}`, `{categories}`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Section keys that map onto template slots
// ---------------------------------------------------------------------------

pub const SECTION_TASK_DEFINITION: &str = "task_definition";
pub const SECTION_ORIGINALITY_RULE: &str = "originality_rule";
pub const SECTION_OUTPUT_FORMAT_RULE: &str = "output_format_rule";
pub const SECTION_TITLE_REQUIREMENT: &str = "title_requirement";
pub const SECTION_SUMMARY_REQUIREMENT: &str = "summary_requirement";
pub const SECTION_BODY_REQUIREMENT: &str = "body_requirement";
pub const SECTION_COMPANY_REMOVAL: &str = "company_removal";
pub const SECTION_PLATE_REMOVAL: &str = "plate_removal";
pub const SECTION_CUSTOM_INSTRUCTIONS_HEADER: &str = "custom_instructions_header";
pub const SECTION_ARTICLE_HEADER: &str = "article_header";
pub const SECTION_FINAL_INSTRUCTION: &str = "final_instruction";

/// Section keys that override a template slot. Other section keys are
/// editorial content only and do not affect assembly.
pub const OVERRIDABLE_SECTIONS: &[&str] = &[
    SECTION_TASK_DEFINITION,
    SECTION_ORIGINALITY_RULE,
    SECTION_OUTPUT_FORMAT_RULE,
    SECTION_TITLE_REQUIREMENT,
    SECTION_SUMMARY_REQUIREMENT,
    SECTION_BODY_REQUIREMENT,
    SECTION_COMPANY_REMOVAL,
    SECTION_PLATE_REMOVAL,
    SECTION_CUSTOM_INSTRUCTIONS_HEADER,
    SECTION_ARTICLE_HEADER,
    SECTION_FINAL_INSTRUCTION,
];

// ---------------------------------------------------------------------------
// Template structs
// ---------------------------------------------------------------------------

/// A news category: lookup key and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub name: String,
}

impl Category {
    fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritingStyleTexts {
    pub formal: String,
    pub informal: String,
    pub neutral: String,
    pub default: String,
}

impl Default for WritingStyleTexts {
    fn default() -> Self {
        Self {
            formal: "[FORMAL YAZIM STİLİ] Kullanılacak dil resmi, profesyonel ve bilgilendirici olmalıdır. Argo veya clickbait ifadelerden kaçınılmalıdır.".into(),
            informal: "[SAMİMİ YAZIM STİLİ] Kullanılacak dil samimi, sıcak ve anlaşılır olmalıdır. Okuyucuyla yakın bir bağ kurmalı, ancak yine de profesyonel kalmalıdır.".into(),
            neutral: "[NÖTR YAZIM STİLİ] Kullanılacak dil tamamen nötr, objektif ve duygusal yüklenmeden uzak bilgilendirici olmalıdır. Sadece gerçekleri aktarmalıdır.".into(),
            default: "[VARSAYILAN FORMAL YAZIM STİLİ] Kullanılacak dil resmi, profesyonel ve bilgilendirici olmalıdır. Argo veya clickbait ifadelerden kaçınılmalıdır.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CensorshipTexts {
    pub initials: String,
    pub full: String,
    pub generic: String,
}

impl Default for CensorshipTexts {
    fn default() -> Self {
        Self {
            initials: "İsimleri kısmi sansürle (örn: Ahmet K.)".into(),
            full: "İsimleri tamamen sansürle (örn: A.B.)".into(),
            generic: "İsimleri sansürle (örn: A.B.)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputTemplates {
    pub json: String,
    pub xml: String,
    pub plain: String,
}

impl Default for OutputTemplates {
    fn default() -> Self {
        Self {
            json: "[ÇIKTI FORMATI: JSON]\n\
Çıktı formatı JSON olarak ayarlanmıştır. Aşağıdaki yapıya uygun olarak çıktı ver:\n\
{\n  \"baslik\": \"\",\n  \"ozet\": \"\",\n  \"haber_metni\": \"\",\n  \"kategori\": \"\",\n  \"etiketler\": []\n}"
                .into(),
            xml: "[ÇIKTI FORMATI: XML]\n\
Çıktı formatı XML olarak ayarlanmıştır. Aşağıdaki yapıya uygun olarak çıktı ver:\n\
<haber>\n  <baslik></baslik>\n  <ozet></ozet>\n  <haber_metni></haber_metni>\n  <kategori></kategori>\n  <etiketler></etiketler>\n</haber>"
                .into(),
            plain: "[ÇIKTI FORMATI: DÜZ METİN]\n\
Çıktı formatı düz metin olarak ayarlanmıştır. Aşağıdaki yapıya uygun olarak çıktı ver:\n\
BAŞLIK: [başlık]\nÖZET: [özet]\nHABER METNİ: [haber metni]\nKATEGORİ: [kategori]\nETİKETLER: [etiketler]"
                .into(),
        }
    }
}

/// Labels used for `{format}` in the rule and closing instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatLabels {
    pub json: String,
    pub xml: String,
    pub plain: String,
}

impl Default for FormatLabels {
    fn default() -> Self {
        Self {
            json: "JSON".into(),
            xml: "XML".into(),
            plain: "düz metin".into(),
        }
    }
}

/// Every text fragment used to assemble a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    pub task_definition: String,

    pub writing_rules_header: String,
    pub originality_rule: String,
    /// Contains `{style}`.
    pub style_rule: String,
    /// Contains `{format}`.
    pub output_format_rule: String,
    pub writing_styles: WritingStyleTexts,

    pub outputs_header: String,
    pub title_requirement: String,
    pub title_with_city: String,
    pub title_without_city: String,
    pub title_suffix: String,
    pub summary_requirement: String,
    pub body_requirement: String,
    pub news_type_social: String,
    pub news_type_comprehensive: String,
    pub censorship: CensorshipTexts,
    pub company_removal: String,
    pub plate_removal: String,
    pub category_auto: String,
    /// Contains `{category}`.
    pub category_preferred: String,
    /// Contains `{count}`.
    pub tags_requirement: String,

    pub categories: Vec<Category>,
    /// Contains `{categories}`.
    pub category_list: String,
    /// Contains `{categories}` and `{category}`.
    pub category_list_selected: String,

    pub output_templates: OutputTemplates,
    pub format_labels: FormatLabels,

    pub custom_instructions_header: String,
    pub article_header: String,
    /// Contains `{format}`.
    pub final_instruction: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            task_definition: "GÖREV TANIMI:\n\
Sen, kurumsal bir gazetenin web sitesi için içerik üreten profesyonel bir yapay zeka editörüsün. \
Görevin, sana verilen orijinal haber metnini aşağıdaki kurallara göre işleyerek, \
belirtilen formatta profesyonel ve özgün bir haber içeriği oluşturmaktır."
                .into(),

            writing_rules_header: "KURALLAR:".into(),
            originality_rule: "• ÖZGÜNLÜK: Metin tamamen yeniden yazılmalı, kopya olmamalıdır. \
Ancak orijinal haberdeki tüm temel bilgiler, veriler, isimler ve tarihler korunmalıdır."
                .into(),
            style_rule: "• KURUMSAL DİL: {style}".into(),
            output_format_rule: "• ÇIKTININ FORMATI: Çıktı, yalnızca ve yalnızca aşağıda belirtilen {format} yapısına uygun olmalıdır. \
Cevabına asla açıklama veya ek metin ekleme, sadece {format} çıktısı ver."
                .into(),
            writing_styles: WritingStyleTexts::default(),

            outputs_header: "İSTENEN ÇIKTILAR:".into(),
            title_requirement:
                "• ETKİLİ BAŞLIK: Haberi net yansıtan, profesyonel, dikkat çekici, yanıltıcı olmayan"
                    .into(),
            title_with_city: ", şehir bilgisi içeren".into(),
            title_without_city: ", şehir bilgisi içermeyen".into(),
            title_suffix: " bir başlık.".into(),
            summary_requirement: "• HABER ÖZETİ: Haberin en önemli noktalarını içeren, 2-3 cümlelik, şehir bilgisi içeren kısa bir özet."
                .into(),
            body_requirement:
                "• ÖZGÜN HABER METNİ: Tüm bilgileri koruyarak, metni özgün cümlelerle baştan yaz"
                    .into(),
            news_type_social: "Metni sosyal medyada paylaşılacak şekilde kısa ve akıcı tut".into(),
            news_type_comprehensive: "Metni tüm ayrıntıları içeren kapsamlı bir haber olarak yaz"
                .into(),
            censorship: CensorshipTexts::default(),
            company_removal: "Özel şirket bilgilerini metinden çıkar".into(),
            plate_removal: "Plaka bilgilerini metinden çıkar".into(),
            category_auto: "• MUHTEMEL KATEGORİ: Verilen kategori listesinden en uygun olanı seç."
                .into(),
            category_preferred: "• MUHTEMEL KATEGORİ: Mümkünse \"{category}\" kategorisini tercih et, uygun değilse en uygun kategoriyi seç."
                .into(),
            tags_requirement: "• ETİKETLER: Haberle ilgili, SEO uyumlu {count} adet etiket oluştur ve bunları bir dizi (array) olarak listele."
                .into(),

            categories: vec![
                Category::new("asayis", "Asayiş"),
                Category::new("gundem", "Gündem"),
                Category::new("ekonomi", "Ekonomi"),
                Category::new("siyaset", "Siyaset"),
                Category::new("spor", "Spor"),
                Category::new("teknoloji", "Teknoloji"),
                Category::new("saglik", "Sağlık"),
                Category::new("yasam", "Yaşam"),
                Category::new("egitim", "Eğitim"),
                Category::new("dunya", "Dünya"),
                Category::new("kultur", "Kültür & Sanat"),
                Category::new("magazin", "Magazin"),
                Category::new("genel", "Genel"),
            ],
            category_list: "KATEGORİ LİSTESİ:\n{categories}".into(),
            category_list_selected: "KATEGORİ LİSTESİ (SEÇİLİ: {category}):\n{categories}\n\n\
ÖNEM: Yukarıdaki listeden \"{category}\" kategorisi tercih edilmektedir."
                .into(),

            output_templates: OutputTemplates::default(),
            format_labels: FormatLabels::default(),

            custom_instructions_header: "ÖZEL TALİMATLAR:".into(),
            article_header: "ORİJİNAL HABER METNİ:".into(),
            final_instruction:
                "Yukarıdaki kurallara göre bu haber metnini işle ve sadece {format} formatında çıktı ver:"
                    .into(),
        }
    }
}

/// Where the startup template set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    File(PathBuf),
    Builtin,
}

impl PromptTemplates {
    /// Built-in template set.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Resolve the startup template set.
    ///
    /// With a path that exists, the file must parse; a broken file is an
    /// error rather than a silent fallback. A missing path or `None` yields
    /// the built-in set.
    pub fn load(path: Option<&Path>) -> Result<(Self, TemplateSource), CoreError> {
        let Some(path) = path else {
            return Ok((Self::builtin(), TemplateSource::Builtin));
        };

        if !path.exists() {
            tracing::warn!(path = %path.display(), "Template file not found, using built-in templates");
            return Ok((Self::builtin(), TemplateSource::Builtin));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!("Failed to read template file {}: {e}", path.display()))
        })?;
        let templates = Self::from_json(&raw).map_err(|e| match e {
            CoreError::Validation(msg) => {
                CoreError::Validation(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;

        Ok((templates, TemplateSource::File(path.to_path_buf())))
    }

    /// Parse a (possibly partial) JSON template document.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid template JSON: {e}")))
    }

    /// Copy of these templates with matching section texts applied.
    ///
    /// Section keys not in [`OVERRIDABLE_SECTIONS`] are ignored. An empty
    /// section text is applied as-is, which drops the corresponding block or
    /// clause from the assembled prompt.
    pub fn with_section_overrides<'a, I>(&self, sections: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = self.clone();
        for (key, text) in sections {
            let text = text.trim_end().to_string();
            match key {
                SECTION_TASK_DEFINITION => out.task_definition = text,
                SECTION_ORIGINALITY_RULE => out.originality_rule = text,
                SECTION_OUTPUT_FORMAT_RULE => out.output_format_rule = text,
                SECTION_TITLE_REQUIREMENT => out.title_requirement = text,
                SECTION_SUMMARY_REQUIREMENT => out.summary_requirement = text,
                SECTION_BODY_REQUIREMENT => out.body_requirement = text,
                SECTION_COMPANY_REMOVAL => out.company_removal = text,
                SECTION_PLATE_REMOVAL => out.plate_removal = text,
                SECTION_CUSTOM_INSTRUCTIONS_HEADER => out.custom_instructions_header = text,
                SECTION_ARTICLE_HEADER => out.article_header = text,
                SECTION_FINAL_INSTRUCTION => out.final_instruction = text,
                _ => {}
            }
        }
        out
    }

    /// Display name for a category key or name. Unknown values pass through.
    pub fn category_display_name<'a>(&'a self, value: &'a str) -> &'a str {
        let value = value.trim();
        self.categories
            .iter()
            .find(|c| c.key == value || c.name == value)
            .map(|c| c.name.as_str())
            .unwrap_or(value)
    }

    /// Whether `name` is one of the listed category display names.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Category display names joined for the list block.
    pub fn category_names(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
