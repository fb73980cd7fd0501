//! HTML rendering of the demo page. All user-provided text is escaped.

use crate::common::error::DemoError;
use crate::pipelines::canned::CannedExample;
use crate::pipelines::splitting::SplitMode;
use crate::pipelines::summarization::XLSumLanguages;
use crate::server::routes::{InputMode, Submission};
use html_escape::{encode_double_quoted_attribute, encode_text};

const TITLE: &str = "Arabic To English Summarization Demo";

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
nav{width:14em;padding:1em;background:#f0f2f6;min-height:100vh}\
main{flex:1;padding:1em 2em}\
.columns{display:flex;gap:2em}.columns section{flex:1}\
textarea{width:100%;min-height:12em}\
.error{color:#b00020}";

/// # Page model
pub struct PageView<'a> {
    mode: InputMode,
    canned: &'a [CannedExample],
    default_split_mode: SplitMode,
    result: Option<(&'a Submission, &'a [String])>,
}

impl<'a> PageView<'a> {
    pub fn new(
        mode: InputMode,
        canned: &'a [CannedExample],
        default_split_mode: SplitMode,
    ) -> PageView<'a> {
        PageView {
            mode,
            canned,
            default_split_mode,
            result: None,
        }
    }

    /// Shows a processed submission in the output columns.
    pub fn with_result(mut self, submission: &'a Submission, outputs: &'a [String]) -> Self {
        self.result = Some((submission, outputs));
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
            TITLE, STYLE
        ));
        self.render_sidebar(&mut html);
        html.push_str("<main>");
        html.push_str(&format!(
            "<h1>{}</h1><p>This app demonstrates cutting-edge NLP summarization and translation capabilities.</p>",
            TITLE
        ));
        html.push_str("<h2>Input Area</h2>");
        match self.mode {
            InputMode::Canned => self.render_canned_form(&mut html),
            InputMode::Text => self.render_text_form(&mut html),
        }
        self.render_columns(&mut html);
        render_about(&mut html);
        html.push_str("</main></body></html>");
        html
    }

    fn render_sidebar(&self, html: &mut String) {
        html.push_str("<nav><h3>Input Mode</h3><ul>");
        for mode in [InputMode::Canned, InputMode::Text] {
            if mode == self.mode {
                html.push_str(&format!("<li><strong>{}</strong></li>", mode.label()));
            } else {
                html.push_str(&format!(
                    "<li><a href=\"/?mode={}\">{}</a></li>",
                    mode.value(),
                    mode.label()
                ));
            }
        }
        html.push_str("</ul></nav>");
    }

    fn render_canned_form(&self, html: &mut String) {
        html.push_str("<form method=\"post\" action=\"/summarize\">");
        html.push_str("<input type=\"hidden\" name=\"mode\" value=\"canned\">");
        html.push_str(
            "<label for=\"canned_index\">Select a canned input</label> <select id=\"canned_index\" name=\"canned_index\">",
        );
        for (index, example) in self.canned.iter().enumerate() {
            html.push_str(&format!(
                "<option value=\"{}\">{}</option>",
                index,
                encode_text(&example.label)
            ));
        }
        html.push_str("</select> <button type=\"submit\">Summarize!</button></form>");
    }

    fn render_text_form(&self, html: &mut String) {
        let (text, split_mode, do_translate) = match self.result {
            Some((submission, _)) => (
                submission.text.as_str(),
                submission.split_mode,
                submission.do_translate,
            ),
            None => ("", self.default_split_mode, true),
        };
        html.push_str("<form method=\"post\" action=\"/summarize\">");
        html.push_str("<input type=\"hidden\" name=\"mode\" value=\"text\">");
        html.push_str(&format!(
            "<p><label for=\"text\">Your Text</label><br><textarea id=\"text\" name=\"text\">{}</textarea></p>",
            encode_text(text)
        ));
        html.push_str("<p><label for=\"split_mode\">Split On</label> <select id=\"split_mode\" name=\"split_mode\">");
        for mode in SplitMode::ALL {
            let selected = if mode == split_mode { " selected" } else { "" };
            html.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>",
                encode_double_quoted_attribute(mode.name()),
                selected,
                mode
            ));
        }
        html.push_str("</select></p>");
        html.push_str(&format!(
            "<p><label><input type=\"checkbox\" name=\"do_translate\" value=\"true\"{}> Arabic Text?</label></p>",
            if do_translate { " checked" } else { "" }
        ));
        html.push_str("<button type=\"submit\">Summarize!</button></form>");
    }

    fn render_columns(&self, html: &mut String) {
        html.push_str("<div class=\"columns\"><section><h2>Full Input</h2>");
        if let Some((submission, _)) = self.result {
            for paragraph in submission.text.split("\n\n") {
                html.push_str(&format!("<p>{}</p>", encode_text(paragraph)));
            }
        }
        html.push_str("</section><section><h2>Summarization</h2>");
        if let Some((_, outputs)) = self.result {
            if outputs.is_empty() {
                html.push_str("<p><em>No summary was produced for this input.</em></p>");
            }
            for output in outputs {
                html.push_str(&format!("<p>{}</p>", encode_text(output)));
            }
        }
        html.push_str("</section></div>");
    }
}

fn render_about(html: &mut String) {
    html.push_str("<details><summary>About the Model</summary>");
    html.push_str("<p>This model is a combination of two models: mT5 and M2M100.</p><ol>");
    html.push_str(
        "<li>The model <a href=\"https://arxiv.org/abs/2010.11934\">mT5</a> was trained on the multilingual dataset \
<a href=\"https://aclanthology.org/2021.findings-acl.413/\">XLSum</a> by the \
<a href=\"https://cse.buet.ac.bd/research/index.php\">BUET CSE</a> NLP Group. The model can be found on the \
<a href=\"https://huggingface.co/csebuetnlp/mT5_multilingual_XLSum\">Hugging Face model repository</a>. \
It was intended to summarize news articles.</li>",
    );
    html.push_str(
        "<li>The model <a href=\"https://huggingface.co/facebook/m2m100_418M\">M2M100</a> is the translation model. \
It is maintained by Facebook AI Research.</li></ol>",
    );
    html.push_str("<table><caption>XLSum languages</caption><tr><th>Language</th><th>Training samples</th></tr>");
    for (language, samples) in XLSumLanguages::TRAINING_SAMPLES {
        html.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", language, samples));
    }
    html.push_str("</table></details>");
}

/// Renders a standalone error page.
pub fn render_error(error: &DemoError) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>\
<body><main><h1>{}</h1><p class=\"error\">{}</p><p><a href=\"/\">Back to the demo</a></p></main></body></html>",
        TITLE,
        STYLE,
        TITLE,
        encode_text(&error.to_string())
    )
}
