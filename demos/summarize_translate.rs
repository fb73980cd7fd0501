// Copyright 2022 The summatrans Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

extern crate anyhow;

use anyhow::Context;
use summatrans::common::resources::ResourceLocation;
use summatrans::pipelines::demo::{DemoModel, DemoModelConfig};
use summatrans::pipelines::splitting::SplitMode;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    //    Set-up model
    let weights = std::env::var("XLSUM_MODEL_PATH")
        .context("set XLSUM_MODEL_PATH to the converted mT5 XLSum rust_model.ot")?;
    let mut config = DemoModelConfig::default();
    config.summarizer.model_resource = Some(ResourceLocation::local(weights));
    let model = DemoModel::new(&config)?;

    //    Define input
    let input = "أعلنت وكالة الفضاء الأوروبية، يوم الثلاثاء، نجاح إطلاق قمر صناعي جديد مخصص لرصد التغيرات \
المناخية وقياس مستويات سطح البحر بدقة غير مسبوقة. وقال مسؤولون في الوكالة إن القمر سيرسل أولى بياناته خلال \
الأسابيع المقبلة، وإن هذه البيانات ستكون متاحة مجانا للباحثين حول العالم.

وأضاف المسؤولون أن المشروع استغرق أكثر من عشر سنوات من التطوير بمشاركة عشرات المؤسسات العلمية، وأن تكلفته \
تجاوزت مليار يورو. ويأمل العلماء أن تساعد القياسات الجديدة في تحسين نماذج التنبؤ بالفيضانات والعواصف.";

    let output = model.run(input, SplitMode::Paragraph, true);
    for summary in output {
        println!("{}", summary);
    }

    Ok(())
}
