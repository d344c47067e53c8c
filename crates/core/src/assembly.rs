//! Prompt assembly.
//!
//! Turns templates, resolved settings and article text into the single
//! instruction string sent to the model. Pure and deterministic.

use crate::settings::{
    CityInfo, NameCensorship, NewsType, OutputFormat, PromptSettings, TargetCategory,
    WritingStyle,
};
use crate::templates::PromptTemplates;

/// Separator between blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Build the complete prompt.
pub fn build_prompt(templates: &PromptTemplates, settings: &PromptSettings, article: &str) -> String {
    build_blocks(templates, settings, article).join(BLOCK_SEPARATOR)
}

/// Build the non-empty prompt blocks in order.
pub fn build_blocks(
    templates: &PromptTemplates,
    settings: &PromptSettings,
    article: &str,
) -> Vec<String> {
    let format_label = format_label(templates, settings.output_format);

    [
        templates.task_definition.clone(),
        writing_rules(templates, settings, format_label),
        requested_outputs(templates, settings),
        category_list(templates, &settings.target_category),
        output_template(templates, settings.output_format).to_string(),
        labelled(&templates.custom_instructions_header, &settings.custom_instructions),
        labelled(&templates.article_header, article),
        templates.final_instruction.replace("{format}", format_label),
    ]
    .into_iter()
    .map(|block| block.trim_end().to_string())
    .filter(|block| !block.trim().is_empty())
    .collect()
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

fn writing_rules(templates: &PromptTemplates, settings: &PromptSettings, format: &str) -> String {
    let style = style_text(templates, settings.writing_style);
    lines([
        templates.writing_rules_header.clone(),
        templates.originality_rule.clone(),
        templates.style_rule.replace("{style}", style),
        templates.output_format_rule.replace("{format}", format),
    ])
}

fn requested_outputs(templates: &PromptTemplates, settings: &PromptSettings) -> String {
    lines([
        templates.outputs_header.clone(),
        title_requirement(templates, settings.title_city_info),
        templates.summary_requirement.clone(),
        body_requirement(templates, settings),
        category_requirement(templates, &settings.target_category),
        templates
            .tags_requirement
            .replace("{count}", &settings.tag_count.to_string()),
    ])
}

fn title_requirement(templates: &PromptTemplates, city: CityInfo) -> String {
    if templates.title_requirement.trim().is_empty() {
        return String::new();
    }
    let city_clause = match city {
        CityInfo::Include => templates.title_with_city.as_str(),
        CityInfo::Exclude => templates.title_without_city.as_str(),
        CityInfo::Auto => "",
    };
    format!(
        "{}{}{}",
        templates.title_requirement, city_clause, templates.title_suffix
    )
}

fn body_requirement(templates: &PromptTemplates, settings: &PromptSettings) -> String {
    if templates.body_requirement.trim().is_empty() {
        return String::new();
    }

    let news_type = match settings.news_type {
        NewsType::Social => templates.news_type_social.as_str(),
        NewsType::Comprehensive => templates.news_type_comprehensive.as_str(),
    };
    let censorship = match settings.name_censorship {
        NameCensorship::None => "",
        NameCensorship::Initials => templates.censorship.initials.as_str(),
        NameCensorship::Full => templates.censorship.full.as_str(),
        NameCensorship::Generic => templates.censorship.generic.as_str(),
    };
    let company = if settings.remove_company_info {
        templates.company_removal.as_str()
    } else {
        ""
    };
    let plate = if settings.remove_plate_info {
        templates.plate_removal.as_str()
    } else {
        ""
    };

    let mut text = templates.body_requirement.clone();
    for clause in [news_type, censorship, company, plate] {
        if !clause.trim().is_empty() {
            text.push_str(". ");
            text.push_str(clause.trim());
        }
    }
    text.push('.');
    text
}

fn category_requirement(templates: &PromptTemplates, target: &TargetCategory) -> String {
    match target {
        TargetCategory::Auto => templates.category_auto.clone(),
        TargetCategory::Named(value) => templates
            .category_preferred
            .replace("{category}", templates.category_display_name(value)),
    }
}

fn category_list(templates: &PromptTemplates, target: &TargetCategory) -> String {
    let names = templates.category_names();
    if let TargetCategory::Named(value) = target {
        let name = templates.category_display_name(value);
        if templates.has_category(name) {
            return templates
                .category_list_selected
                .replace("{categories}", &names)
                .replace("{category}", name);
        }
    }
    templates.category_list.replace("{categories}", &names)
}

fn output_template(templates: &PromptTemplates, format: OutputFormat) -> &str {
    match format {
        OutputFormat::Json => &templates.output_templates.json,
        OutputFormat::Xml => &templates.output_templates.xml,
        OutputFormat::Plain => &templates.output_templates.plain,
    }
}

fn format_label(templates: &PromptTemplates, format: OutputFormat) -> &str {
    match format {
        OutputFormat::Json => &templates.format_labels.json,
        OutputFormat::Xml => &templates.format_labels.xml,
        OutputFormat::Plain => &templates.format_labels.plain,
    }
}

fn style_text(templates: &PromptTemplates, style: WritingStyle) -> &str {
    match style {
        WritingStyle::Formal => &templates.writing_styles.formal,
        WritingStyle::Informal => &templates.writing_styles.informal,
        WritingStyle::Neutral => &templates.writing_styles.neutral,
        WritingStyle::Default => &templates.writing_styles.default,
    }
}

/// `header\nbody` when the body is non-blank, otherwise empty.
fn labelled(header: &str, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    if header.trim().is_empty() {
        return body.to_string();
    }
    format!("{}\n{}", header.trim_end(), body)
}

/// Join non-blank lines with newlines.
fn lines<const N: usize>(parts: [String; N]) -> String {
    parts
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{RawSettings, KEY_OUTPUT_FORMAT, KEY_TAG_COUNT, KEY_TARGET_CATEGORY};

    const ARTICLE: &str = "Ankara'da yeni bir köprü açıldı.";

    fn settings_with(pairs: &[(&str, &str)]) -> PromptSettings {
        let raw: RawSettings = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PromptSettings::resolve(&[&raw]).unwrap()
    }

    #[test]
    fn default_prompt_contains_all_blocks_in_order() {
        let templates = PromptTemplates::builtin();
        let prompt = build_prompt(&templates, &PromptSettings::default(), ARTICLE);

        let markers = [
            "GÖREV TANIMI:",
            "KURALLAR:",
            "İSTENEN ÇIKTILAR:",
            "KATEGORİ LİSTESİ:",
            "[ÇIKTI FORMATI: JSON]",
            "ORİJİNAL HABER METNİ:",
            "sadece JSON formatında çıktı ver:",
        ];
        let mut last = 0;
        for marker in markers {
            let pos = prompt[last..]
                .find(marker)
                .unwrap_or_else(|| panic!("missing or out of order: {marker}"));
            last += pos;
        }
        assert!(!prompt.contains("ÖZEL TALİMATLAR:"));
    }

    #[test]
    fn blocks_are_separated_by_one_blank_line() {
        let templates = PromptTemplates::builtin();
        let blocks = build_blocks(&templates, &PromptSettings::default(), ARTICLE);
        let prompt = build_prompt(&templates, &PromptSettings::default(), ARTICLE);
        assert_eq!(prompt, blocks.join("\n\n"));
        assert!(!prompt.contains("\n\n\n"));
        assert!(blocks.iter().all(|b| !b.trim().is_empty()));
    }

    #[test]
    fn assembly_is_deterministic() {
        let templates = PromptTemplates::builtin();
        let settings = settings_with(&[(KEY_TAG_COUNT, "3"), (KEY_TARGET_CATEGORY, "spor")]);
        let a = build_prompt(&templates, &settings, ARTICLE);
        let b = build_prompt(&templates, &settings, ARTICLE);
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_output_format_uses_json_template() {
        let templates = PromptTemplates::builtin();
        let unknown = build_prompt(&templates, &settings_with(&[(KEY_OUTPUT_FORMAT, "yaml")]), ARTICLE);
        let json = build_prompt(&templates, &settings_with(&[(KEY_OUTPUT_FORMAT, "json")]), ARTICLE);
        assert_eq!(unknown, json);
        assert!(unknown.contains("\"etiketler\": []"));
    }

    #[test]
    fn xml_format_changes_template_and_instructions() {
        let templates = PromptTemplates::builtin();
        let prompt = build_prompt(&templates, &settings_with(&[(KEY_OUTPUT_FORMAT, "xml")]), ARTICLE);
        assert!(prompt.contains("<haber>"));
        assert!(prompt.contains("belirtilen XML yapısına"));
        assert!(prompt.ends_with("sadece XML formatında çıktı ver:"));
        assert!(!prompt.contains("\"baslik\""));
    }

    #[test]
    fn tag_count_is_rendered() {
        let templates = PromptTemplates::builtin();
        let prompt = build_prompt(&templates, &settings_with(&[(KEY_TAG_COUNT, "3")]), ARTICLE);
        assert!(prompt.contains("SEO uyumlu 3 adet etiket"));
    }

    #[test]
    fn title_city_clause_follows_setting() {
        let templates = PromptTemplates::builtin();
        let mut settings = PromptSettings::default();

        settings.title_city_info = CityInfo::Include;
        assert!(build_prompt(&templates, &settings, ARTICLE)
            .contains("yanıltıcı olmayan, şehir bilgisi içeren bir başlık."));

        settings.title_city_info = CityInfo::Exclude;
        assert!(build_prompt(&templates, &settings, ARTICLE)
            .contains("yanıltıcı olmayan, şehir bilgisi içermeyen bir başlık."));

        settings.title_city_info = CityInfo::Auto;
        assert!(build_prompt(&templates, &settings, ARTICLE)
            .contains("yanıltıcı olmayan bir başlık."));
    }

    #[test]
    fn body_clauses_follow_flags() {
        let templates = PromptTemplates::builtin();
        let settings = PromptSettings {
            name_censorship: NameCensorship::None,
            remove_company_info: false,
            remove_plate_info: true,
            news_type: NewsType::Social,
            ..PromptSettings::default()
        };
        let prompt = build_prompt(&templates, &settings, ARTICLE);
        assert!(prompt.contains(
            "baştan yaz. Metni sosyal medyada paylaşılacak şekilde kısa ve akıcı tut. Plaka bilgilerini metinden çıkar."
        ));
        assert!(!prompt.contains("İsimleri"));
        assert!(!prompt.contains("şirket"));
    }

    #[test]
    fn selected_category_is_highlighted() {
        let templates = PromptTemplates::builtin();
        let prompt = build_prompt(
            &templates,
            &settings_with(&[(KEY_TARGET_CATEGORY, "kultur")]),
            ARTICLE,
        );
        assert!(prompt.contains("Mümkünse \"Kültür & Sanat\" kategorisini tercih et"));
        assert!(prompt.contains("KATEGORİ LİSTESİ (SEÇİLİ: Kültür & Sanat):"));
        assert!(prompt.contains("ÖNEM: Yukarıdaki listeden \"Kültür & Sanat\""));
    }

    #[test]
    fn unlisted_category_is_preferred_but_not_highlighted() {
        let templates = PromptTemplates::builtin();
        let prompt = build_prompt(
            &templates,
            &settings_with(&[(KEY_TARGET_CATEGORY, "bilim")]),
            ARTICLE,
        );
        assert!(prompt.contains("Mümkünse \"bilim\" kategorisini tercih et"));
        assert!(prompt.contains("KATEGORİ LİSTESİ:\nAsayiş, Gündem"));
    }

    #[test]
    fn custom_instructions_block_appears_when_set() {
        let templates = PromptTemplates::builtin();
        let settings = PromptSettings {
            custom_instructions: "Başlıkta ünlem kullanma".into(),
            ..PromptSettings::default()
        };
        let prompt = build_prompt(&templates, &settings, ARTICLE);
        assert!(prompt.contains("ÖZEL TALİMATLAR:\nBaşlıkta ünlem kullanma"));
    }

    #[test]
    fn blank_article_block_is_dropped() {
        let templates = PromptTemplates::builtin();
        let prompt = build_prompt(&templates, &PromptSettings::default(), "   ");
        assert!(!prompt.contains("ORİJİNAL HABER METNİ:"));
    }

    #[test]
    fn blank_section_override_drops_block() {
        let templates = PromptTemplates::builtin()
            .with_section_overrides([(crate::templates::SECTION_TASK_DEFINITION, "")]);
        let prompt = build_prompt(&templates, &PromptSettings::default(), ARTICLE);
        assert!(prompt.starts_with("KURALLAR:"));
    }
}
